//! Tile coordinate resolution for a vector tile source.
//!
//! A tile's `z/x/y` either comes from explicit command-line values or is
//! recovered from the source path or URL, following the usual tile server
//! layouts:
//!
//! - `https://tiles.example.com/14/8580/5738.mvt`
//! - `tiles/7/3/2.vector.pbf`
//!
//! Whichever way the coordinate is obtained, it is validated against the tile
//! pyramid before it is handed to the reprojection step.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

use crate::coord::TileCoord;

/// Tile coordinate supplied explicitly by the caller.
///
/// Values the caller did not set default to 0 when at least one of them was
/// given, so `0/0/0` is reachable by setting any single component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplicitTile {
    pub zoom: u32,
    pub x: u32,
    pub y: u32,
}

impl ExplicitTile {
    /// Builds an explicit tile from optional components.
    ///
    /// Returns `None` when no component was supplied, in which case the
    /// coordinate has to be parsed from the source.
    pub fn from_parts(zoom: Option<u32>, x: Option<u32>, y: Option<u32>) -> Option<Self> {
        if zoom.is_none() && x.is_none() && y.is_none() {
            return None;
        }
        Some(Self {
            zoom: zoom.unwrap_or(0),
            x: x.unwrap_or(0),
            y: y.unwrap_or(0),
        })
    }
}

impl From<ExplicitTile> for TileCoord {
    fn from(tile: ExplicitTile) -> Self {
        TileCoord::new(tile.zoom, tile.x, tile.y)
    }
}

/// Which component of a `z/x/y` segment failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Zoom,
    X,
    Y,
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Component::Zoom => write!(f, "z"),
            Component::X => write!(f, "x"),
            Component::Y => write!(f, "y"),
        }
    }
}

/// Error extracting a tile coordinate from a source identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileParseError {
    /// No `z/x/y.mvt` or `z/x/y.vector.pbf` segment in the source
    #[error("can not parse z,x,y from mvt {0}")]
    NoMatch(String),

    /// A captured group does not fit an unsigned 32-bit integer
    #[error("parse {value} to {component} failed")]
    InvalidComponent { component: Component, value: String },
}

/// Error resolving the tile coordinate of a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error(transparent)]
    Parse(#[from] TileParseError),

    /// The coordinate lies outside the tile pyramid
    #[error("tile {0} is not valid")]
    InvalidTile(TileCoord),
}

/// Get the tile path regex pattern.
///
/// We capture:
/// - Group 1: zoom (one or two digits)
/// - Group 2: x (unsigned integer)
/// - Group 3: y (unsigned integer, directly followed by the extension)
fn tile_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([0-9]{1,2})/([0-9]+)/([0-9]+)(?:\.mvt|\.vector\.pbf)")
            .expect("tile path pattern is a valid regex")
    })
}

fn parse_component(value: &str, component: Component) -> Result<u32, TileParseError> {
    value
        .parse::<u32>()
        .map_err(|_| TileParseError::InvalidComponent {
            component,
            value: value.to_string(),
        })
}

/// Extract the `z/x/y` tile coordinate from a path or URL.
///
/// Only the first matching segment is used. The result is not validated
/// against the tile pyramid.
///
/// # Examples
///
/// ```
/// use vt2geojson::locator::parse_tile_path;
///
/// let tile = parse_tile_path("https://example.com/14/1308/6777.mvt").unwrap();
/// assert_eq!((tile.zoom, tile.x, tile.y), (14, 1308, 6777));
/// ```
pub fn parse_tile_path(source: &str) -> Result<TileCoord, TileParseError> {
    let captures = tile_path_pattern()
        .captures(source)
        .ok_or_else(|| TileParseError::NoMatch(source.to_string()))?;

    // Groups are mandatory in the pattern, so a successful match has all three
    let group = |i: usize| captures.get(i).map_or("", |m| m.as_str());

    let zoom = parse_component(group(1), Component::Zoom)?;
    let x = parse_component(group(2), Component::X)?;
    let y = parse_component(group(3), Component::Y)?;

    Ok(TileCoord::new(zoom, x, y))
}

/// Resolve and validate the tile coordinate for a conversion.
///
/// Explicit coordinates win; otherwise the coordinate is parsed from
/// `source`.
pub fn resolve(explicit: Option<ExplicitTile>, source: &str) -> Result<TileCoord, LocateError> {
    let tile = match explicit {
        Some(explicit) => {
            debug!(zoom = explicit.zoom, x = explicit.x, y = explicit.y, "Using explicit tile");
            TileCoord::from(explicit)
        }
        None => {
            let tile = parse_tile_path(source)?;
            debug!(%tile, source, "Parsed tile from source");
            tile
        }
    };

    tile.validate().map_err(|_| LocateError::InvalidTile(tile))
}
