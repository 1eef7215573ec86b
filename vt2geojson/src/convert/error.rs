//! Conversion error types.

use thiserror::Error;

use crate::coord::TileCoord;
use crate::locator::{LocateError, TileParseError};
use crate::mvt::DecodeError;
use crate::source::SourceError;

/// Errors that can end a conversion.
///
/// Every variant is terminal; the conversion produces no output.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// No tile source was given
    #[error("Please specify the mvt file or URI by '--mvt'.")]
    MissingSource,

    /// The tile source could not be read or fetched
    #[error(transparent)]
    SourceLoad(#[from] SourceError),

    /// The tile bytes are not a valid (gzipped) vector tile
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// No tile coordinate could be parsed from the source
    #[error(transparent)]
    TileParse(#[from] TileParseError),

    /// The tile coordinate is outside the tile pyramid
    #[error("Invalid tile z,x,y: {0}")]
    InvalidTile(TileCoord),

    /// GeoJSON could not be serialized
    #[error("failed to serialize GeoJSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<LocateError> for ConvertError {
    fn from(e: LocateError) -> Self {
        match e {
            LocateError::Parse(e) => ConvertError::TileParse(e),
            LocateError::InvalidTile(tile) => ConvertError::InvalidTile(tile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_error_mapping() {
        let parse: ConvertError =
            LocateError::Parse(TileParseError::NoMatch("x.mvt".to_string())).into();
        assert!(matches!(parse, ConvertError::TileParse(_)));

        let invalid: ConvertError = LocateError::InvalidTile(TileCoord::new(1, 2, 2)).into();
        assert!(matches!(invalid, ConvertError::InvalidTile(_)));
        assert_eq!(invalid.to_string(), "Invalid tile z,x,y: 1/2/2");
    }

    #[test]
    fn test_missing_source_message() {
        assert!(ConvertError::MissingSource.to_string().contains("--mvt"));
    }
}
