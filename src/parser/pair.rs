//! Literal `lat,lng` pair recognition

use std::sync::OnceLock;

use regex::Regex;

use crate::models::Coordinates;

/// Whole-string `lat,lng` shape, optionally signed, whitespace tolerant.
fn pair_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([+-]?\d+(?:\.\d+)?)\s*,\s*([+-]?\d+(?:\.\d+)?)\s*$")
            .expect("pair pattern is valid")
    })
}

/// Splits `text` into two numeric strings when it has the pair shape.
fn split_pair(text: &str) -> Option<(f64, f64)> {
    let caps = pair_pattern().captures(text)?;
    let lat = caps.get(1)?.as_str().parse().ok()?;
    let lng = caps.get(2)?.as_str().parse().ok()?;
    Some((lat, lng))
}

/// Parses `text` as a literal `lat,lng` pair, accepting it only when both
/// numbers are finite and in range.
pub fn parse_lat_lng_pair(text: &str) -> Option<Coordinates> {
    split_pair(text).and_then(|(lat, lng)| Coordinates::new(lat, lng))
}

/// True when `text` has the shape of a `lat,lng` pair, in range or not.
/// Such strings are coordinate data, never useful geocoder input.
pub fn looks_like_lat_lng_pair(text: &str) -> bool {
    split_pair(text).is_some()
}
