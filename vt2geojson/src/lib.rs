//! vt2geojson - Mapbox Vector Tile to GeoJSON conversion
//!
//! This library converts a single vector tile, read from a local file or
//! fetched over HTTP, into one GeoJSON FeatureCollection in WGS84.
//!
//! # Example
//!
//! ```no_run
//! use vt2geojson::convert::{ConvertConfig, Converter, Output};
//! use vt2geojson::source::DefaultLoader;
//!
//! let config = ConvertConfig {
//!     source: Some("tiles/14/8580/5738.mvt".to_string()),
//!     ..Default::default()
//! };
//! let loader = DefaultLoader::with_timeout(config.http_timeout_secs).unwrap();
//!
//! if let Output::GeoJson(json) = Converter::new(loader).run(&config).unwrap() {
//!     println!("{}", json);
//! }
//! ```

pub mod convert;
pub mod coord;
pub mod geojson;
pub mod locator;
pub mod logging;
pub mod mvt;
pub mod project;
pub mod source;
pub mod summary;
pub mod version;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
