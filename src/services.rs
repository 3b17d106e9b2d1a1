//! Composition root
//!
//! Builds the resolver and travel matrix with their caches, the shared rate
//! limiter and the provider they sit in front of. All mutable state lives
//! in the instances built here; there are no globals.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::cache::CacheStats;
use crate::config::Config;
use crate::error::{ProviderError, Result};
use crate::limiter::FixedWindowRateLimiter;
use crate::matrix::TravelMatrixCalculator;
use crate::provider::{
    DistanceProvider, GeocodeProvider, GoogleMapsClient, GoogleMapsConfig, RateLimitPolicy,
    ThrottledProvider,
};
use crate::resolve::{CoordinateResolver, HttpRedirectResolver, LinkExpander, RedirectResolver};

/// Cache statistics for every cache owned by [`Services`].
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStats {
    pub geocode: CacheStats,
    pub distance: CacheStats,
    pub short_links: CacheStats,
}

/// Fully wired resolution and travel matrix services.
pub struct Services {
    pub resolver: CoordinateResolver,
    pub matrix: TravelMatrixCalculator,
    pub limiter: Arc<Mutex<FixedWindowRateLimiter>>,
}

impl Services {
    /// Wires the given providers, each behind the shared rate limiter.
    pub fn new(
        geocoder: Arc<dyn GeocodeProvider>,
        distance: Arc<dyn DistanceProvider>,
        redirects: Arc<dyn RedirectResolver>,
        config: &Config,
    ) -> Self {
        let limiter = Arc::new(Mutex::new(FixedWindowRateLimiter::new()));
        let policy = RateLimitPolicy {
            max_requests: config.rate_limit_max_requests,
            window: config.rate_limit_window(),
        };

        let geocoder = ThrottledProvider::new(geocoder, limiter.clone(), policy);
        let distance = ThrottledProvider::new(distance, limiter.clone(), policy);

        let expander = LinkExpander::new(redirects, config.short_link_cache_ttl());
        let resolver =
            CoordinateResolver::new(expander, Arc::new(geocoder), config.geocode_cache_ttl());
        let matrix = TravelMatrixCalculator::new(Arc::new(distance), config.distance_cache_ttl());

        Self {
            resolver,
            matrix,
            limiter,
        }
    }

    /// Builds the Google Maps backed services described by `config`.
    ///
    /// # Errors
    /// `MissingCredential` when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ProviderError::MissingCredential("GOOGLE_MAPS_API_KEY".to_string()))?;

        let client = Arc::new(GoogleMapsClient::new(
            GoogleMapsConfig::new(api_key)
                .with_base_url(config.maps_base_url.clone())
                .with_timeout(config.provider_timeout()),
        )?);
        let redirects = HttpRedirectResolver::new(config.link_expand_timeout())
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;

        Ok(Self::new(client.clone(), client, Arc::new(redirects), config))
    }

    pub async fn stats(&self) -> ServiceStats {
        ServiceStats {
            geocode: self.resolver.geocode_cache_stats().await,
            distance: self.matrix.cache_stats().await,
            short_links: self.resolver.expander().cache_stats().await,
        }
    }
}
