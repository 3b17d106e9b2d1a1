//! Location Reference Parser
//!
//! Pure functions that look at a location reference (a map link or free
//! text) and either recover literal coordinates from it or derive the
//! ordered list of search strings worth sending to a geocoder.
//!
//! Nothing here fails: every function returns an empty/absent result when
//! the input carries nothing usable.

mod candidates;
mod embedded;
mod pair;


use url::Url;

pub use candidates::{clean_candidate, extract_search_candidates};
pub use embedded::{extract_embedded_coordinates, locate_embedded_coordinates, CoordinateSource};
pub use pair::{looks_like_lat_lng_pair, parse_lat_lng_pair};

/// Query parameters that may carry a literal `lat,lng` pair.
pub const COORDINATE_QUERY_KEYS: [&str; 8] = [
    "q",
    "query",
    "ll",
    "sll",
    "destination",
    "origin",
    "daddr",
    "saddr",
];

/// Query parameters that may carry human-readable search text.
pub const SEARCH_QUERY_KEYS: [&str; 6] = ["q", "query", "destination", "origin", "daddr", "saddr"];

// == URL Detection ==
/// Parses `input` as an absolute `http`/`https` URL with a host.
///
/// Anything else (plain text, `loc:` references, bare hosts without a
/// scheme) is treated as free text.
pub fn parse_url(input: &str) -> Option<Url> {
    let url = Url::parse(input.trim()).ok()?;
    let web = matches!(url.scheme(), "http" | "https");
    (web && url.host_str().is_some()).then_some(url)
}

/// First value of query parameter `name`, already form-decoded.
pub(crate) fn query_value(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Percent-decodes a URL path or path segment, replacing invalid UTF-8.
pub(crate) fn decode_path(raw: &str) -> String {
    percent_encoding::percent_decode_str(raw)
        .decode_utf8_lossy()
        .into_owned()
}
