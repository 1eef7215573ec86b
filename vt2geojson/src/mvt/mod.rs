//! Mapbox Vector Tile decoding.
//!
//! Turns the raw (optionally gzip-compressed) protobuf payload of one vector
//! tile into owned [`Layers`]. Geometries stay in tile-local integer space
//! until [`crate::project`] rewrites them into longitude/latitude.

mod decode;
mod types;

pub use decode::{decode, DecodeError};
pub use types::{Feature, Layer, Layers, Properties, DEFAULT_EXTENT};

#[cfg(test)]
pub(crate) mod fixtures;
