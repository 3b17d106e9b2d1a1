//! Coordinate resolver
//!
//! Exact data first, paid lookups last: literal coordinates recovered from
//! the reference always win, and the geocoder is only asked about candidate
//! texts in order, most specific first.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::expand::LinkExpander;
use crate::cache::{CacheStats, TtlCache};
use crate::error::Result;
use crate::models::Coordinates;
use crate::parser::{
    extract_search_candidates, locate_embedded_coordinates, parse_lat_lng_pair, parse_url,
};
use crate::provider::GeocodeProvider;

// == Coordinate Resolver ==
/// Resolves location references to coordinates.
pub struct CoordinateResolver {
    expander: LinkExpander,
    geocoder: Arc<dyn GeocodeProvider>,
    /// Keyed by lower-cased candidate text; caches "no result" too
    geocode_cache: Mutex<TtlCache<Option<Coordinates>>>,
}

impl CoordinateResolver {
    pub fn new(
        expander: LinkExpander,
        geocoder: Arc<dyn GeocodeProvider>,
        geocode_cache_ttl: Duration,
    ) -> Self {
        Self {
            expander,
            geocoder,
            geocode_cache: Mutex::new(TtlCache::new(geocode_cache_ttl)),
        }
    }

    // == Resolve ==
    /// Resolves `raw` to coordinates.
    ///
    /// Returns `Ok(None)` when no literal coordinates are present and every
    /// geocoder candidate came back empty. A provider failure on any
    /// candidate stops the search and is returned as `Err`.
    pub async fn resolve(&self, raw: &str) -> Result<Option<Coordinates>> {
        let original = raw.trim();
        if original.is_empty() {
            return Ok(None);
        }

        let expanded = self.expander.maybe_expand(original).await;
        let parse_candidates: Vec<&str> = if expanded != original {
            vec![expanded.as_str(), original]
        } else {
            vec![original]
        };

        for candidate in &parse_candidates {
            if let Some((source, coords)) = locate_embedded_coordinates(candidate) {
                debug!(?source, %coords, "Found literal coordinates");
                return Ok(Some(coords));
            }
        }

        // Plain text that is itself a pair is taken as-is, never geocoded
        if parse_url(original).is_none() {
            if let Some(coords) = parse_lat_lng_pair(original) {
                debug!(%coords, "Input is a literal coordinate pair");
                return Ok(Some(coords));
            }
        }

        let mut seen = HashSet::new();
        let search_candidates: Vec<String> = parse_candidates
            .iter()
            .flat_map(|candidate| extract_search_candidates(candidate))
            .filter(|candidate| seen.insert(candidate.clone()))
            .collect();

        for candidate in &search_candidates {
            if let Some(coords) = self.cached_geocode(candidate).await? {
                info!(candidate = %candidate, %coords, "Geocoded location reference");
                return Ok(Some(coords));
            }
            debug!(candidate = %candidate, "No geocoding result; trying next candidate");
        }

        debug!(input = original, tried = search_candidates.len(), "Location reference not found");
        Ok(None)
    }

    /// Geocodes through the cache. Errors are returned and not cached.
    async fn cached_geocode(&self, candidate: &str) -> Result<Option<Coordinates>> {
        let key = candidate.to_lowercase();

        if let Some(outcome) = self.geocode_cache.lock().await.get(&key) {
            debug!(key = %key, "Geocode cache hit");
            return Ok(outcome);
        }

        let outcome = self.geocoder.geocode(candidate).await?;
        self.geocode_cache.lock().await.set(key, outcome, None);
        Ok(outcome)
    }

    pub async fn geocode_cache_stats(&self) -> CacheStats {
        self.geocode_cache.lock().await.stats()
    }

    pub fn expander(&self) -> &LinkExpander {
        &self.expander
    }
}
