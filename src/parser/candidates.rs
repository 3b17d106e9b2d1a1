//! Geocoder search candidates
//!
//! Derives the text worth geocoding from a reference, most specific first.

use std::collections::HashSet;

use url::Url;

use super::embedded::strip_loc_prefix;
use super::pair::looks_like_lat_lng_pair;
use super::{decode_path, parse_url, query_value, SEARCH_QUERY_KEYS};

// == Candidate Cleaning ==
/// Normalises one raw candidate: drops a leading `loc:` marker, turns `+`
/// into spaces and collapses whitespace. Returns `None` when nothing
/// geocodable is left (empty, or a bare `lat,lng` pair).
pub fn clean_candidate(raw: &str) -> Option<String> {
    let text = strip_loc_prefix(raw.trim()).replace('+', " ");
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.is_empty() || looks_like_lat_lng_pair(&cleaned) {
        None
    } else {
        Some(cleaned)
    }
}

/// Decoded path segment that follows the literal segment `marker`.
fn segment_after(url: &Url, marker: &str) -> Option<String> {
    let mut segments = url.path_segments()?;
    segments.find(|segment| *segment == marker)?;
    segments
        .next()
        .filter(|segment| !segment.is_empty())
        .map(decode_path)
}

/// Whole decoded path without the `/@...` viewport suffix, with `/`, `_`
/// and `-` turned into spaces.
fn flattened_path(url: &Url) -> String {
    let path = decode_path(url.path());
    let path = match path.find("/@") {
        Some(index) => &path[..index],
        None => path.as_str(),
    };
    path.replace(['/', '_', '-'], " ")
}

/// Raw candidates for a URL, in priority order, before cleaning.
fn raw_url_candidates(url: &Url, input: &str) -> Vec<String> {
    let mut raw: Vec<String> = SEARCH_QUERY_KEYS
        .iter()
        .filter_map(|key| query_value(url, key))
        .collect();
    raw.extend(segment_after(url, "place"));
    raw.extend(segment_after(url, "search"));
    raw.push(flattened_path(url));
    raw.push(input.to_string());
    raw
}

// == Public API ==

/// Ordered, de-duplicated search strings for a reference.
///
/// Plain text yields itself (trimmed). A URL yields, in order: search-style
/// query parameter values, the segment after `/place/`, the segment after
/// `/search/`, the flattened path and finally the URL itself. Candidates
/// that are empty or are literal `lat,lng` pairs are dropped.
pub fn extract_search_candidates(input: &str) -> Vec<String> {
    let input = input.trim();

    let Some(url) = parse_url(input) else {
        if input.is_empty() || looks_like_lat_lng_pair(input) {
            return Vec::new();
        }
        return vec![input.to_string()];
    };

    let mut seen = HashSet::new();
    raw_url_candidates(&url, input)
        .iter()
        .filter_map(|raw| clean_candidate(raw))
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect()
}
