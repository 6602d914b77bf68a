//! Geometry vertex and index grammars
//!
//! ```text
//! vertices := [key ":"] triple (" " triple)*
//! key      := "relative" | "geodetic"      (case-insensitive, default relative)
//! triple   := n "," n "," n                 (x,y,z or longitude,latitude,height)
//! ```

use crate::codec::attributes::{build_number, parse_number_array};
use crate::models::{GeodeticPosition, GeometryIndices, GeometryPositions, Vector3};
use once_cell::sync::Lazy;
use regex::Regex;

static POSITIONS_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\w+?)\s*:").expect("positions key pattern is valid")
});

/// Split off the optional `key:` prefix; no prefix yields an empty key
fn split_positions_key(text: &str) -> (String, &str) {
    match POSITIONS_KEY.captures(text) {
        Some(captures) => {
            let key = captures
                .get(1)
                .map(|m| m.as_str().to_ascii_lowercase())
                .unwrap_or_default();
            let rest = captures.get(0).map_or(text, |m| &text[m.end()..]);
            (key, rest)
        }
        None => (String::new(), text),
    }
}

/// Parse a vertex list
///
/// Unknown keys and empty input give `None`. A key with nothing after it
/// (`"relative:"`) is an empty list.
pub fn parse_geometry_positions(text: &str) -> Option<GeometryPositions> {
    let (key, body) = split_positions_key(text);
    let numbers = match key.as_str() {
        "" | "relative" | "geodetic" => match parse_number_array(body) {
            Some(numbers) => numbers,
            None if !key.is_empty() => Vec::new(),
            None => return None,
        },
        _ => return None,
    };

    let triples = numbers.chunks_exact(3);
    if key == "geodetic" {
        let positions = triples
            .map(|t| GeodeticPosition::new(t[0], t[1], t[2]))
            .collect();
        Some(GeometryPositions::Geodetic(positions))
    } else {
        let positions = triples.map(|t| Vector3::new(t[0], t[1], t[2])).collect();
        Some(GeometryPositions::Relative(positions))
    }
}

/// Parse a polygon index list, stopping at the first invalid token
pub fn parse_geometry_indices(text: &str) -> Option<Vec<u32>> {
    if text.is_empty() {
        return None;
    }
    Some(
        text.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map_while(|token| token.parse::<u32>().ok())
            .collect(),
    )
}

pub fn build_geometry_positions(positions: &GeometryPositions) -> String {
    let (key, triples): (&str, Vec<String>) = match positions {
        GeometryPositions::Raw(raw) => return raw.clone(),
        GeometryPositions::Relative(points) => (
            "relative",
            points
                .iter()
                .map(|p| build_triple(p.x, p.y, p.z))
                .collect(),
        ),
        GeometryPositions::Geodetic(points) => (
            "geodetic",
            points
                .iter()
                .map(|p| build_triple(p.longitude, p.latitude, p.ellipsoidal_height))
                .collect(),
        ),
    };

    if triples.is_empty() {
        format!("{}:", key)
    } else {
        format!("{}: {}", key, triples.join(" "))
    }
}

fn build_triple(a: f64, b: f64, c: f64) -> String {
    format!("{},{},{}", build_number(a), build_number(b), build_number(c))
}

pub fn build_geometry_indices(indices: &GeometryIndices) -> String {
    match indices {
        GeometryIndices::Raw(raw) => raw.clone(),
        GeometryIndices::List(list) => list
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" "),
    }
}
