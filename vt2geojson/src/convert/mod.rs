//! Single-tile conversion pipeline.
//!
//! One call to [`Converter::run`] performs the whole pass:
//!
//! ```text
//! source ──► load ──► decode ──┬──► summary
//!                              │
//!                              └──► resolve tile ──► project ──► merge ──► JSON
//! ```
//!
//! The pipeline never writes to stdout itself; it returns the text to print,
//! so a failure at any stage leaves no partial output behind.

mod error;

pub use error::ConvertError;

use tracing::info;

use crate::geojson::merge;
use crate::locator::{self, ExplicitTile};
use crate::mvt;
use crate::project::project_layers;
use crate::source::{SourceLoader, DEFAULT_TIMEOUT_SECS};
use crate::summary::TileSummary;

/// What a conversion produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// GeoJSON FeatureCollection
    #[default]
    GeoJson,
    /// Layer overview, no GeoJSON
    Summary,
}

/// Options for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Path or URL of the tile
    pub source: Option<String>,
    /// Explicit tile coordinate; parsed from `source` when `None`
    pub tile: Option<ExplicitTile>,
    /// Source bytes are gzip-compressed
    pub gzipped: bool,
    /// Only emit features of this layer
    pub layer: Option<String>,
    pub mode: OutputMode,
    /// Timeout for HTTP sources
    pub http_timeout_secs: u64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source: None,
            tile: None,
            gzipped: false,
            layer: None,
            mode: OutputMode::GeoJson,
            http_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Single-line FeatureCollection JSON
    GeoJson(String),
    /// Multi-line layer summary
    Summary(String),
}

impl Output {
    pub fn as_str(&self) -> &str {
        match self {
            Output::GeoJson(s) | Output::Summary(s) => s,
        }
    }
}

/// Runs conversions with a given source loader.
pub struct Converter<L: SourceLoader> {
    loader: L,
}

impl<L: SourceLoader> Converter<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Convert the configured tile.
    pub fn run(&self, config: &ConvertConfig) -> Result<Output, ConvertError> {
        let source = config
            .source
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConvertError::MissingSource)?;

        let content = self.loader.load(source)?;
        let mut layers = mvt::decode(&content, config.gzipped)?;

        if config.mode == OutputMode::Summary {
            return Ok(Output::Summary(TileSummary::new(&layers).to_string()));
        }

        let tile = locator::resolve(config.tile, source)?;
        project_layers(&tile, &mut layers);

        let collection = merge(layers.to_feature_collections(), config.layer.as_deref());
        info!(
            %tile,
            features = collection.features.len(),
            "Converted tile to GeoJSON"
        );

        Ok(Output::GeoJson(collection.to_json()?))
    }
}
