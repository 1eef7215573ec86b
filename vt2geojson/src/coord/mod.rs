//! Coordinate conversion module
//!
//! Provides the tile pyramid coordinate type and the inverse Web Mercator
//! conversion from tile-local vector tile coordinates to WGS84 degrees.

mod types;

pub use types::{CoordError, TileCoord, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM};

use std::f64::consts::PI;

/// Converts a tile-local coordinate to longitude/latitude.
///
/// # Arguments
///
/// * `tile` - The tile the coordinate belongs to
/// * `extent` - Local coordinate resolution of the tile layer (commonly 4096)
/// * `local_x` - Column inside the tile, 0 at the west edge
/// * `local_y` - Row inside the tile, 0 at the north edge
///
/// Coordinates outside `[0, extent)` are projected as-is. Geometries that
/// cross a tile edge legitimately carry such values.
///
/// # Returns
///
/// `(lon, lat)` in degrees.
#[inline]
pub fn tile_to_lon_lat(tile: &TileCoord, extent: u32, local_x: f64, local_y: f64) -> (f64, f64) {
    let n = 2.0_f64.powi(tile.zoom as i32);
    let extent = extent as f64;

    // Fractional position in tile space
    let px = tile.x as f64 + local_x / extent;
    let py = tile.y as f64 + local_y / extent;

    let lon = px / n * 360.0 - 180.0;

    // Inverse Web Mercator
    let lat_rad = (PI * (1.0 - 2.0 * py / n)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    (lon, lat)
}
