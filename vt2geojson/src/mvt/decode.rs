//! Protobuf and gzip decoding of vector tile payloads.

use std::io::{self, Read};

use flate2::read::GzDecoder;
use geozero::mvt::{tile, Message, Tile};
use geozero::ToGeo;
use serde_json::{Number, Value};
use thiserror::Error;
use tracing::{debug, info};

use super::types::{Feature, Layer, Layers, Properties, DEFAULT_EXTENT};

/// Errors that can occur while decoding a vector tile.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Payload was flagged as gzipped but could not be inflated
    #[error("failed to decompress gzipped tile: {0}")]
    Gzip(#[source] io::Error),

    /// Payload is not a valid vector tile protobuf message
    #[error("failed to decode vector tile: {0}")]
    Protobuf(String),

    /// A layer declares an extent of zero
    #[error("layer '{layer}' has an invalid extent of 0")]
    InvalidExtent { layer: String },

    /// A feature's tags do not resolve against the layer's keys and values
    #[error("layer '{layer}' has invalid feature tags: {reason}")]
    InvalidTag { layer: String, reason: String },

    /// A feature's geometry command stream is malformed
    #[error("layer '{layer}' has an invalid feature geometry: {reason}")]
    Geometry { layer: String, reason: String },
}

/// Decode a vector tile payload into layers.
///
/// # Arguments
///
/// * `bytes` - Raw tile content
/// * `gzipped` - Whether `bytes` must be inflated first
pub fn decode(bytes: &[u8], gzipped: bool) -> Result<Layers, DecodeError> {
    let inflated;
    let payload = if gzipped {
        inflated = gunzip(bytes)?;
        debug!(compressed = bytes.len(), inflated = inflated.len(), "Inflated tile");
        inflated.as_slice()
    } else {
        bytes
    };

    let tile = Tile::decode(payload).map_err(|e| DecodeError::Protobuf(e.to_string()))?;

    let layers = tile
        .layers
        .iter()
        .map(decode_layer)
        .collect::<Result<Vec<_>, _>>()?;
    let layers = Layers::new(layers);

    info!(
        layers = layers.len(),
        features = layers.feature_count(),
        "Decoded vector tile"
    );

    Ok(layers)
}

fn gunzip(bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).map_err(DecodeError::Gzip)?;
    Ok(out)
}

fn decode_layer(layer: &tile::Layer) -> Result<Layer, DecodeError> {
    let extent = layer.extent.unwrap_or(DEFAULT_EXTENT);
    if extent == 0 {
        return Err(DecodeError::InvalidExtent {
            layer: layer.name.clone(),
        });
    }

    let features = layer
        .features
        .iter()
        .map(|feature| decode_feature(layer, feature))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        layer = %layer.name,
        extent,
        features = features.len(),
        "Decoded layer"
    );

    Ok(Layer {
        name: layer.name.clone(),
        version: layer.version,
        extent,
        features,
    })
}

fn decode_feature(layer: &tile::Layer, feature: &tile::Feature) -> Result<Feature, DecodeError> {
    let invalid = |reason: String| DecodeError::Geometry {
        layer: layer.name.clone(),
        reason,
    };

    let geometry = match geom_type(feature) {
        Some(geom_type) if !feature.geometry.is_empty() => {
            check_commands(geom_type, &feature.geometry).map_err(invalid)?;
            Some(feature.to_geo().map_err(|e| invalid(e.to_string()))?)
        }
        _ => None,
    };

    Ok(Feature {
        id: feature.id,
        geometry,
        properties: decode_properties(layer, &feature.tags)?,
    })
}

/// Geometry type of a feature, `None` for unknown or undefined values.
fn geom_type(feature: &tile::Feature) -> Option<tile::GeomType> {
    match feature.r#type? {
        t if t == tile::GeomType::Point as i32 => Some(tile::GeomType::Point),
        t if t == tile::GeomType::Linestring as i32 => Some(tile::GeomType::Linestring),
        t if t == tile::GeomType::Polygon as i32 => Some(tile::GeomType::Polygon),
        _ => None,
    }
}

const MOVE_TO: u32 = 1;
const LINE_TO: u32 = 2;
const CLOSE_PATH: u32 = 7;

/// Check the command structure of a geometry before it is read.
///
/// Points are a single MoveTo, lines repeat MoveTo(1) LineTo(n), and polygon
/// rings repeat MoveTo(1) LineTo(n >= 2) ClosePath(1).
fn check_commands(geom_type: tile::GeomType, geometry: &[u32]) -> Result<(), String> {
    let commands = read_commands(geometry)?;

    let valid = match geom_type {
        tile::GeomType::Point => matches!(commands.as_slice(), [(MOVE_TO, n)] if *n > 0),
        tile::GeomType::Linestring => {
            !commands.is_empty()
                && commands.len() % 2 == 0
                && commands
                    .chunks(2)
                    .all(|c| matches!(c, [(MOVE_TO, 1), (LINE_TO, n)] if *n > 0))
        }
        tile::GeomType::Polygon => {
            !commands.is_empty()
                && commands.len() % 3 == 0
                && commands
                    .chunks(3)
                    .all(|c| matches!(c, [(MOVE_TO, 1), (LINE_TO, n), (CLOSE_PATH, 1)] if *n >= 2))
        }
        tile::GeomType::Unknown => true,
    };

    if valid {
        Ok(())
    } else {
        Err(format!(
            "unexpected {:?} command sequence {:?}",
            geom_type, commands
        ))
    }
}

/// Split a command stream into `(command, count)` pairs, checking that every
/// command is followed by all of its parameters.
fn read_commands(geometry: &[u32]) -> Result<Vec<(u32, u32)>, String> {
    let mut commands = Vec::new();
    let mut rest = geometry;

    while let Some((&integer, tail)) = rest.split_first() {
        let (id, count) = (integer & 0x7, integer >> 3);
        let params = match id {
            MOVE_TO | LINE_TO => count as usize * 2,
            CLOSE_PATH => 0,
            other => return Err(format!("unknown geometry command {}", other)),
        };
        if tail.len() < params {
            return Err(format!(
                "command {} with count {} needs {} parameters, found {}",
                id,
                count,
                params,
                tail.len()
            ));
        }
        commands.push((id, count));
        rest = &tail[params..];
    }

    Ok(commands)
}

fn decode_properties(layer: &tile::Layer, tags: &[u32]) -> Result<Properties, DecodeError> {
    let invalid = |reason: String| DecodeError::InvalidTag {
        layer: layer.name.clone(),
        reason,
    };

    if tags.len() % 2 != 0 {
        return Err(invalid(format!("odd number of tag indices ({})", tags.len())));
    }

    let mut properties = Properties::new();
    for pair in tags.chunks_exact(2) {
        let (key_index, value_index) = (pair[0] as usize, pair[1] as usize);

        let key = layer
            .keys
            .get(key_index)
            .ok_or_else(|| invalid(format!("key index {} out of range", key_index)))?;
        let value = layer
            .values
            .get(value_index)
            .ok_or_else(|| invalid(format!("value index {} out of range", value_index)))?;

        properties.insert(key.clone(), to_json_value(value));
    }

    Ok(properties)
}

/// Convert a vector tile value into its JSON counterpart.
///
/// Non-finite floats have no JSON representation and become `null`.
fn to_json_value(value: &tile::Value) -> Value {
    if let Some(s) = &value.string_value {
        Value::String(s.clone())
    } else if let Some(f) = value.float_value {
        float_value(f as f64)
    } else if let Some(d) = value.double_value {
        float_value(d)
    } else if let Some(i) = value.int_value {
        Value::Number(Number::from(i))
    } else if let Some(u) = value.uint_value {
        Value::Number(Number::from(u))
    } else if let Some(s) = value.sint_value {
        Value::Number(Number::from(s))
    } else if let Some(b) = value.bool_value {
        Value::Bool(b)
    } else {
        Value::Null
    }
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}
