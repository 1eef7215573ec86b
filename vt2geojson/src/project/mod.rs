//! Reprojection of decoded layers from tile-local space to WGS84.
//!
//! Every coordinate of every geometry is rewritten in place with
//! [`tile_to_lon_lat`], using the owning layer's extent and the single tile
//! coordinate of the conversion. Layers and features are visited in decode
//! order so the output is reproducible.

use geo_types::{Coord, Geometry, LineString, Polygon, Rect, Triangle};
use tracing::debug;

pub use crate::coord::tile_to_lon_lat;

use crate::coord::TileCoord;
use crate::mvt::Layers;

/// Project all geometries of all layers to longitude/latitude.
pub fn project_layers(tile: &TileCoord, layers: &mut Layers) {
    for layer in layers.iter_mut() {
        let extent = layer.extent;
        for feature in &mut layer.features {
            if let Some(geometry) = feature.geometry.as_mut() {
                project_geometry(tile, extent, geometry);
            }
        }
        debug!(layer = %layer.name, %tile, extent, "Projected layer to WGS84");
    }
}

/// Project one geometry, whatever its type or nesting depth.
pub fn project_geometry(tile: &TileCoord, extent: u32, geometry: &mut Geometry<f64>) {
    let project = |c: &mut Coord<f64>| {
        let (lon, lat) = tile_to_lon_lat(tile, extent, c.x, c.y);
        c.x = lon;
        c.y = lat;
    };
    map_coords(geometry, &project);
}

fn map_coords<F: Fn(&mut Coord<f64>)>(geometry: &mut Geometry<f64>, f: &F) {
    match geometry {
        Geometry::Point(p) => f(&mut p.0),
        Geometry::Line(line) => {
            f(&mut line.start);
            f(&mut line.end);
        }
        Geometry::LineString(ls) => map_line_string(ls, f),
        Geometry::Polygon(polygon) => map_polygon(polygon, f),
        Geometry::MultiPoint(mp) => mp.0.iter_mut().for_each(|p| f(&mut p.0)),
        Geometry::MultiLineString(mls) => mls.0.iter_mut().for_each(|ls| map_line_string(ls, f)),
        Geometry::MultiPolygon(mp) => mp.0.iter_mut().for_each(|p| map_polygon(p, f)),
        Geometry::GeometryCollection(gc) => gc.0.iter_mut().for_each(|g| map_coords(g, f)),
        Geometry::Rect(rect) => {
            let mut min = rect.min();
            let mut max = rect.max();
            f(&mut min);
            f(&mut max);
            *rect = Rect::new(min, max);
        }
        Geometry::Triangle(t) => {
            let (mut v1, mut v2, mut v3) = (t.v1(), t.v2(), t.v3());
            f(&mut v1);
            f(&mut v2);
            f(&mut v3);
            *t = Triangle::new(v1, v2, v3);
        }
    }
}

fn map_line_string<F: Fn(&mut Coord<f64>)>(ls: &mut LineString<f64>, f: &F) {
    ls.0.iter_mut().for_each(f);
}

fn map_polygon<F: Fn(&mut Coord<f64>)>(polygon: &mut Polygon<f64>, f: &F) {
    polygon.exterior_mut(|exterior| map_line_string(exterior, f));
    polygon.interiors_mut(|interiors| {
        interiors
            .iter_mut()
            .for_each(|interior| map_line_string(interior, f))
    });
}
