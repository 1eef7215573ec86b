//! Human-readable overview of a decoded tile.

use std::collections::BTreeMap;
use std::fmt;

use geo_types::Geometry;

use crate::mvt::{Layer, Layers};

/// Per-layer statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSummary {
    pub name: String,
    pub version: u32,
    pub extent: u32,
    pub features: usize,
    /// Feature count per geometry type name
    pub geometry_types: BTreeMap<&'static str, usize>,
}

impl LayerSummary {
    pub fn from_layer(layer: &Layer) -> Self {
        let mut geometry_types = BTreeMap::new();
        for feature in &layer.features {
            let name = feature.geometry.as_ref().map_or("Unknown", geometry_type_name);
            *geometry_types.entry(name).or_insert(0) += 1;
        }

        Self {
            name: layer.name.clone(),
            version: layer.version,
            extent: layer.extent,
            features: layer.features.len(),
            geometry_types,
        }
    }
}

/// Summary of every layer in a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSummary {
    pub layers: Vec<LayerSummary>,
}

impl TileSummary {
    pub fn new(layers: &Layers) -> Self {
        Self {
            layers: layers.iter().map(LayerSummary::from_layer).collect(),
        }
    }

    pub fn total_features(&self) -> usize {
        self.layers.iter().map(|l| l.features).sum()
    }
}

impl fmt::Display for TileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for layer in &self.layers {
            let types: Vec<String> = layer
                .geometry_types
                .iter()
                .map(|(name, count)| format!("{}: {}", name, count))
                .collect();
            writeln!(
                f,
                "Layer: {}, version: {}, extent: {}, features: {} ({})",
                layer.name,
                layer.version,
                layer.extent,
                layer.features,
                types.join(", ")
            )?;
        }
        write!(
            f,
            "Total: {} layers, {} features",
            self.layers.len(),
            self.total_features()
        )
    }
}

fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
