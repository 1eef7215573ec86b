//! GeoJSON output types.
//!
//! A small serde model of the GeoJSON objects this tool emits: geometries,
//! features and feature collections. Positions are `[lon, lat]` pairs.

use geo_types::{Coord, LineString as GeoLineString, Polygon as GeoPolygon};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::mvt::{Feature as TileFeature, Layers, Properties};

/// A `[lon, lat]` position.
pub type Position = [f64; 2];

/// GeoJSON geometry object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: Position,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
}

fn position(c: &Coord<f64>) -> Position {
    [c.x, c.y]
}

fn line_positions(ls: &GeoLineString<f64>) -> Vec<Position> {
    ls.0.iter().map(position).collect()
}

fn polygon_positions(polygon: &GeoPolygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(line_positions)
        .collect()
}

impl From<&geo_types::Geometry<f64>> for Geometry {
    fn from(geometry: &geo_types::Geometry<f64>) -> Self {
        use geo_types::Geometry as G;

        match geometry {
            G::Point(p) => Geometry::Point {
                coordinates: position(&p.0),
            },
            G::Line(line) => Geometry::LineString {
                coordinates: vec![position(&line.start), position(&line.end)],
            },
            G::LineString(ls) => Geometry::LineString {
                coordinates: line_positions(ls),
            },
            G::Polygon(polygon) => Geometry::Polygon {
                coordinates: polygon_positions(polygon),
            },
            G::MultiPoint(mp) => Geometry::MultiPoint {
                coordinates: mp.0.iter().map(|p| position(&p.0)).collect(),
            },
            G::MultiLineString(mls) => Geometry::MultiLineString {
                coordinates: mls.0.iter().map(line_positions).collect(),
            },
            G::MultiPolygon(mp) => Geometry::MultiPolygon {
                coordinates: mp.0.iter().map(polygon_positions).collect(),
            },
            G::GeometryCollection(gc) => Geometry::GeometryCollection {
                geometries: gc.0.iter().map(Geometry::from).collect(),
            },
            G::Rect(rect) => Geometry::Polygon {
                coordinates: polygon_positions(&rect.to_polygon()),
            },
            G::Triangle(triangle) => Geometry::Polygon {
                coordinates: polygon_positions(&triangle.to_polygon()),
            },
        }
    }
}

/// Tag for the `"type": "Feature"` member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    #[default]
    Feature,
}

/// Tag for the `"type": "FeatureCollection"` member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureCollectionType {
    #[default]
    FeatureCollection,
}

/// GeoJSON feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub geometry: Option<Geometry>,
    pub properties: Properties,
}

impl From<&TileFeature> for Feature {
    fn from(feature: &TileFeature) -> Self {
        Self {
            kind: FeatureType::Feature,
            id: feature.id,
            geometry: feature.geometry.as_ref().map(Geometry::from),
            properties: feature.properties.clone(),
        }
    }
}

/// GeoJSON feature collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: FeatureCollectionType,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize as compact, single-line JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Layers {
    /// Convert every layer into its own feature collection, in decode order.
    pub fn to_feature_collections(&self) -> Vec<(String, FeatureCollection)> {
        self.iter()
            .map(|layer| {
                let collection = FeatureCollection {
                    kind: FeatureCollectionType::FeatureCollection,
                    features: layer.features.iter().map(Feature::from).collect(),
                };
                (layer.name.clone(), collection)
            })
            .collect()
    }
}

/// Merge per-layer collections into one.
///
/// With a `layer` filter only the collections of that name contribute; an
/// unknown name produces an empty collection.
pub fn merge(collections: Vec<(String, FeatureCollection)>, layer: Option<&str>) -> FeatureCollection {
    let mut merged = FeatureCollection::new();
    let mut matched = false;

    for (name, collection) in collections {
        if layer.is_some_and(|wanted| wanted != name) {
            continue;
        }
        matched = true;
        merged.features.extend(collection.features);
    }

    if let (Some(wanted), false) = (layer, matched) {
        warn!(layer = wanted, "Requested layer not found in tile");
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvt::Layer;
    use geo_types::{line_string, point, polygon};
    use serde_json::{json, Value};

    fn tile_feature(id: Option<u64>, geometry: Option<geo_types::Geometry<f64>>) -> TileFeature {
        let mut properties = Properties::new();
        properties.insert("name".to_string(), Value::from("a"));
        TileFeature {
            id,
            geometry,
            properties,
        }
    }

    fn layers() -> Layers {
        Layers::new(vec![
            Layer {
                name: "roads".to_string(),
                version: 2,
                extent: 4096,
                features: vec![
                    tile_feature(Some(1), Some(point!(x: 1.0, y: 2.0).into())),
                    tile_feature(Some(2), Some(point!(x: 3.0, y: 4.0).into())),
                ],
            },
            Layer {
                name: "water".to_string(),
                version: 2,
                extent: 4096,
                features: vec![tile_feature(None, None)],
            },
        ])
    }

    #[test]
    fn test_point_serialization() {
        let geometry = Geometry::from(&geo_types::Geometry::from(point!(x: 8.5, y: 47.3)));
        assert_eq!(
            serde_json::to_value(&geometry).unwrap(),
            json!({"type": "Point", "coordinates": [8.5, 47.3]})
        );
    }

    #[test]
    fn test_polygon_serialization_closes_ring() {
        let polygon: geo_types::Geometry<f64> =
            polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)].into();
        let value = serde_json::to_value(Geometry::from(&polygon)).unwrap();

        assert_eq!(value["type"], "Polygon");
        assert_eq!(
            value["coordinates"],
            json!([[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]])
        );
    }

    #[test]
    fn test_line_string_serialization() {
        let ls: geo_types::Geometry<f64> = line_string![(x: 0.0, y: 1.0), (x: 2.0, y: 3.0)].into();
        assert_eq!(
            serde_json::to_value(Geometry::from(&ls)).unwrap(),
            json!({"type": "LineString", "coordinates": [[0.0, 1.0], [2.0, 3.0]]})
        );
    }

    #[test]
    fn test_feature_serialization() {
        let feature = Feature::from(&tile_feature(Some(9), Some(point!(x: 1.0, y: 2.0).into())));
        assert_eq!(
            serde_json::to_value(&feature).unwrap(),
            json!({
                "type": "Feature",
                "id": 9,
                "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
                "properties": {"name": "a"}
            })
        );
    }

    #[test]
    fn test_feature_without_id_or_geometry() {
        let feature = Feature::from(&tile_feature(None, None));
        let value = serde_json::to_value(&feature).unwrap();

        assert!(value.get("id").is_none());
        assert_eq!(value["geometry"], Value::Null);
    }

    #[test]
    fn test_to_feature_collections_keeps_layer_order() {
        let collections = layers().to_feature_collections();

        let names: Vec<_> = collections.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["roads", "water"]);
        assert_eq!(collections[0].1.features.len(), 2);
        assert_eq!(collections[1].1.features.len(), 1);
    }

    #[test]
    fn test_merge_all_layers() {
        let merged = merge(layers().to_feature_collections(), None);

        assert_eq!(merged.features.len(), 3);
        assert_eq!(merged.features[0].id, Some(1));
        assert_eq!(merged.features[2].id, None);
    }

    #[test]
    fn test_merge_single_layer() {
        let merged = merge(layers().to_feature_collections(), Some("roads"));

        assert_eq!(merged.features.len(), 2);
        assert!(merged.features.iter().all(|f| f.geometry.is_some()));
    }

    #[test]
    fn test_merge_unknown_layer_is_empty() {
        let merged = merge(layers().to_feature_collections(), Some("buildings"));
        assert!(merged.features.is_empty());
        assert_eq!(merged.to_json().unwrap(), r#"{"type":"FeatureCollection","features":[]}"#);
    }

    #[test]
    fn test_to_json_is_single_line() {
        let json = merge(layers().to_feature_collections(), None)
            .to_json()
            .unwrap();
        assert!(!json.contains('\n'));

        let parsed: FeatureCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.features.len(), 3);
    }
}
