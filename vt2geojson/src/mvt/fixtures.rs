//! Hand-built vector tiles for tests.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use geozero::mvt::{tile, Message, Tile};

const MOVE_TO: u32 = 1;
const LINE_TO: u32 = 2;
const CLOSE_PATH: u32 = 7;

fn command(id: u32, count: u32) -> u32 {
    (count << 3) | id
}

fn zigzag(v: i32) -> u32 {
    ((v << 1) ^ (v >> 31)) as u32
}

/// Encodes a single point.
pub fn point(x: i32, y: i32) -> Vec<u32> {
    vec![command(MOVE_TO, 1), zigzag(x), zigzag(y)]
}

/// Encodes a line string through the given absolute coordinates.
pub fn line(coords: &[(i32, i32)]) -> Vec<u32> {
    let mut geometry = Vec::new();
    let mut cursor = (0, 0);
    for (i, &(x, y)) in coords.iter().enumerate() {
        if i == 0 {
            geometry.push(command(MOVE_TO, 1));
        } else if i == 1 {
            geometry.push(command(LINE_TO, coords.len() as u32 - 1));
        }
        geometry.push(zigzag(x - cursor.0));
        geometry.push(zigzag(y - cursor.1));
        cursor = (x, y);
    }
    geometry
}

/// Encodes a single-ring polygon; the ring must not repeat its first vertex.
pub fn polygon(ring: &[(i32, i32)]) -> Vec<u32> {
    let mut geometry = line(ring);
    geometry.push(command(CLOSE_PATH, 1));
    geometry
}

pub fn string_value(s: &str) -> tile::Value {
    tile::Value {
        string_value: Some(s.to_string()),
        ..Default::default()
    }
}

pub fn int_value(i: i64) -> tile::Value {
    tile::Value {
        int_value: Some(i),
        ..Default::default()
    }
}

pub fn feature(
    geom_type: tile::GeomType,
    geometry: Vec<u32>,
    tags: Vec<u32>,
    id: Option<u64>,
) -> tile::Feature {
    tile::Feature {
        id,
        tags,
        r#type: Some(geom_type as i32),
        geometry,
    }
}

pub fn layer(
    name: &str,
    extent: Option<u32>,
    features: Vec<tile::Feature>,
    keys: &[&str],
    values: Vec<tile::Value>,
) -> tile::Layer {
    tile::Layer {
        version: 2,
        name: name.to_string(),
        features,
        keys: keys.iter().map(|k| k.to_string()).collect(),
        values,
        extent,
    }
}

/// Encodes a tile with the given layers.
pub fn encode(layers: Vec<tile::Layer>) -> Vec<u8> {
    Tile { layers }.encode_to_vec()
}

pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

/// A tile with one `poi` layer holding one named point at the tile origin.
pub fn single_point_tile() -> Vec<u8> {
    encode(vec![layer(
        "poi",
        Some(4096),
        vec![feature(
            tile::GeomType::Point,
            point(0, 0),
            vec![0, 0, 1, 1],
            Some(7),
        )],
        &["name", "rank"],
        vec![string_value("Cafe"), int_value(3)],
    )])
}

/// A tile with a `roads` layer (one line) followed by a `water` layer (one polygon).
pub fn roads_and_water_tile() -> Vec<u8> {
    encode(vec![
        layer(
            "roads",
            None,
            vec![feature(
                tile::GeomType::Linestring,
                line(&[(0, 0), (2048, 2048), (4096, 0)]),
                vec![0, 0],
                Some(1),
            )],
            &["class"],
            vec![string_value("primary")],
        ),
        layer(
            "water",
            Some(512),
            vec![feature(
                tile::GeomType::Polygon,
                polygon(&[(0, 0), (256, 0), (256, 256), (0, 256)]),
                vec![],
                None,
            )],
            &[],
            vec![],
        ),
    ])
}
