//! Literal coordinate extraction
//!
//! An ordered table of independent matchers. Each one inspects the raw
//! reference (and its parsed URL, when it is one) and either yields in-range
//! coordinates or passes. The first hit wins.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use super::pair::parse_lat_lng_pair;
use super::{decode_path, parse_url, query_value, COORDINATE_QUERY_KEYS};
use crate::models::Coordinates;

/// Which part of the reference produced the coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSource {
    /// `@lat,lng` viewport marker
    ViewportMarker,
    /// `!3d{lat}!4d{lng}` place-pin data
    PlacePin,
    /// `lat,lng` value of the named query parameter
    QueryParameter(&'static str),
    /// `lat,lng` segment of the decoded URL path
    UrlPath,
}

type Matcher = fn(&str, Option<&Url>) -> Option<(CoordinateSource, Coordinates)>;

/// Evaluation order. The URL-only matchers pass on plain text.
const MATCHERS: [Matcher; 4] = [viewport_marker, place_pin, query_parameters, url_path];

fn viewport_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"@([+-]?\d+(?:\.\d+)?),([+-]?\d+(?:\.\d+)?)").expect("viewport pattern is valid")
    })
}

fn place_pin_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"!3d([+-]?\d+(?:\.\d+)?)!4d([+-]?\d+(?:\.\d+)?)")
            .expect("place pin pattern is valid")
    })
}

/// First in-range capture pair of `pattern` in `input`.
fn first_in_range(pattern: &Regex, input: &str) -> Option<Coordinates> {
    pattern.captures_iter(input).find_map(|caps| {
        let lat = caps.get(1)?.as_str().parse().ok()?;
        let lng = caps.get(2)?.as_str().parse().ok()?;
        Coordinates::new(lat, lng)
    })
}

// == Matchers ==

fn viewport_marker(input: &str, _url: Option<&Url>) -> Option<(CoordinateSource, Coordinates)> {
    first_in_range(viewport_pattern(), input).map(|c| (CoordinateSource::ViewportMarker, c))
}

fn place_pin(input: &str, _url: Option<&Url>) -> Option<(CoordinateSource, Coordinates)> {
    first_in_range(place_pin_pattern(), input).map(|c| (CoordinateSource::PlacePin, c))
}

fn query_parameters(_input: &str, url: Option<&Url>) -> Option<(CoordinateSource, Coordinates)> {
    let url = url?;
    COORDINATE_QUERY_KEYS.iter().find_map(|&key| {
        let value = query_value(url, key)?;
        let value = strip_loc_prefix(value.trim());
        parse_lat_lng_pair(value).map(|c| (CoordinateSource::QueryParameter(key), c))
    })
}

fn url_path(_input: &str, url: Option<&Url>) -> Option<(CoordinateSource, Coordinates)> {
    let path = decode_path(url?.path());
    path.split('/')
        .map(|segment| segment.replace('+', " "))
        .find_map(|segment| parse_lat_lng_pair(&segment))
        .map(|c| (CoordinateSource::UrlPath, c))
}

/// Drops a leading `loc:` marker, ignoring case.
pub(crate) fn strip_loc_prefix(text: &str) -> &str {
    match text.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("loc:") => &text[4..],
        _ => text,
    }
}

// == Public API ==

/// Finds literal coordinates in a reference and reports where they came from.
pub fn locate_embedded_coordinates(input: &str) -> Option<(CoordinateSource, Coordinates)> {
    let input = input.trim();
    let url = parse_url(input);
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(input, url.as_ref()))
}

/// Returns literal coordinates embedded in a reference, if any.
///
/// Tries the `@lat,lng` marker, then `!3d..!4d..` place-pin data, then (for
/// URLs) coordinate-bearing query parameters and the decoded path. Plain
/// text only gets the two marker patterns. Out-of-range pairs are skipped,
/// never returned.
pub fn extract_embedded_coordinates(input: &str) -> Option<Coordinates> {
    locate_embedded_coordinates(input).map(|(_, coords)| coords)
}
