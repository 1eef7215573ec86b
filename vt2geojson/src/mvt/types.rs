//! Decoded vector tile types

use geo_types::Geometry;

/// Extent assumed when a layer does not declare one.
pub const DEFAULT_EXTENT: u32 = 4096;

/// Feature attributes keyed by name.
///
/// Keys are unique; values are JSON scalars (string, number or bool).
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// A single feature of a vector tile layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Feature id, if the tile carries one
    pub id: Option<u64>,
    /// Geometry in tile-local coordinates (or degrees after projection).
    /// `None` for features with an unknown geometry type.
    pub geometry: Option<Geometry<f64>>,
    /// Attribute mapping
    pub properties: Properties,
}

/// A named layer of a vector tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub version: u32,
    /// Local coordinate resolution of the layer's geometries
    pub extent: u32,
    pub features: Vec<Feature>,
}

/// All layers of one decoded tile, in the order they were encoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layers(Vec<Layer>);

impl Layers {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self(layers)
    }

    /// Returns the first layer with the given name.
    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.0.iter().find(|layer| layer.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Layer> {
        self.0.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of features across all layers.
    pub fn feature_count(&self) -> usize {
        self.0.iter().map(|layer| layer.features.len()).sum()
    }
}
