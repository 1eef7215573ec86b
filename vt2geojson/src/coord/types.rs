//! Coordinate type definitions

use std::fmt;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Zoom levels accepted for a tile pyramid coordinate
pub const MIN_ZOOM: u32 = 0;
pub const MAX_ZOOM: u32 = 32;

/// Tile coordinates in the Web Mercator / Slippy Map pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Zoom level (0-32)
    pub zoom: u32,
    /// X coordinate (east-west), 0 at west
    pub x: u32,
    /// Y coordinate (north-south), 0 at north
    pub y: u32,
}

impl TileCoord {
    /// Creates a tile coordinate without validating it.
    pub fn new(zoom: u32, x: u32, y: u32) -> Self {
        Self { zoom, x, y }
    }

    /// Number of tiles along each axis at this zoom level.
    ///
    /// Returns `None` above [`MAX_ZOOM`].
    #[inline]
    pub fn tiles_per_axis(&self) -> Option<u64> {
        if self.zoom > MAX_ZOOM {
            return None;
        }
        Some(1u64 << self.zoom)
    }

    /// Returns true if the coordinate lies inside the tile pyramid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        match self.tiles_per_axis() {
            Some(n) => u64::from(self.x) < n && u64::from(self.y) < n,
            None => false,
        }
    }

    /// Checks the pyramid invariant, handing the tile back on success.
    pub fn validate(self) -> Result<Self, CoordError> {
        if self.zoom > MAX_ZOOM {
            return Err(CoordError::InvalidZoom(self.zoom));
        }
        if !self.is_valid() {
            return Err(CoordError::OutOfPyramid(self));
        }
        Ok(self)
    }

    /// Geographic bounding box of the tile as `(west, south, east, north)` in degrees.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (west, north) = super::tile_to_lon_lat(self, 1, 0.0, 0.0);
        let (east, south) = super::tile_to_lon_lat(self, 1, 1.0, 1.0);
        (west, south, east, north)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Errors that can occur when validating a tile coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordError {
    /// Zoom level is outside valid range (0 to 32)
    InvalidZoom(u32),
    /// Column or row does not exist at the tile's zoom level
    OutOfPyramid(TileCoord),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidZoom(zoom) => {
                write!(
                    f,
                    "Invalid zoom level: {} (must be between {} and {})",
                    zoom, MIN_ZOOM, MAX_ZOOM
                )
            }
            CoordError::OutOfPyramid(tile) => {
                write!(
                    f,
                    "Tile {} is outside the pyramid (x and y must be below 2^{})",
                    tile, tile.zoom
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}
