//! Configuration Module
//!
//! Loads provider credentials, cache lifetimes, timeouts and the provider
//! rate limit from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::provider::DEFAULT_BASE_URL;

/// Runtime configuration.
///
/// Every value except the API key has a default; durations are whole seconds.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Maps API key; required to build the provider
    pub api_key: Option<String>,
    /// Provider base URL
    pub maps_base_url: String,
    /// Geocode cache TTL in seconds
    pub geocode_cache_ttl: u64,
    /// Distance cache TTL in seconds
    pub distance_cache_ttl: u64,
    /// Short-link expansion cache TTL in seconds
    pub short_link_cache_ttl: u64,
    /// Short-link fetch timeout in seconds
    pub link_expand_timeout: u64,
    /// Provider JSON request timeout in seconds
    pub provider_timeout: u64,
    /// Provider calls admitted per rate-limit window
    pub rate_limit_max_requests: u32,
    /// Rate-limit window in seconds
    pub rate_limit_window: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `GOOGLE_MAPS_API_KEY` - Provider credential (no default)
    /// - `MAPS_API_BASE_URL` - Provider base URL (default: https://maps.googleapis.com)
    /// - `GEOCODE_CACHE_TTL` - Geocode cache TTL (default: 86400)
    /// - `DISTANCE_CACHE_TTL` - Distance cache TTL (default: 60)
    /// - `SHORT_LINK_CACHE_TTL` - Expansion cache TTL (default: 604800)
    /// - `LINK_EXPAND_TIMEOUT` - Expansion timeout (default: 10)
    /// - `PROVIDER_TIMEOUT` - Provider timeout (default: 15)
    /// - `RATE_LIMIT_MAX_REQUESTS` - Calls per window (default: 50)
    /// - `RATE_LIMIT_WINDOW` - Window length (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var("GOOGLE_MAPS_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            maps_base_url: env::var("MAPS_API_BASE_URL").unwrap_or(defaults.maps_base_url),
            geocode_cache_ttl: parse_var("GEOCODE_CACHE_TTL", defaults.geocode_cache_ttl),
            distance_cache_ttl: parse_var("DISTANCE_CACHE_TTL", defaults.distance_cache_ttl),
            short_link_cache_ttl: parse_var("SHORT_LINK_CACHE_TTL", defaults.short_link_cache_ttl),
            link_expand_timeout: parse_var("LINK_EXPAND_TIMEOUT", defaults.link_expand_timeout),
            provider_timeout: parse_var("PROVIDER_TIMEOUT", defaults.provider_timeout),
            rate_limit_max_requests: parse_var(
                "RATE_LIMIT_MAX_REQUESTS",
                defaults.rate_limit_max_requests,
            ),
            rate_limit_window: parse_var("RATE_LIMIT_WINDOW", defaults.rate_limit_window),
        }
    }

    pub fn geocode_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.geocode_cache_ttl)
    }

    pub fn distance_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.distance_cache_ttl)
    }

    pub fn short_link_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.short_link_cache_ttl)
    }

    pub fn link_expand_timeout(&self) -> Duration {
        Duration::from_secs(self.link_expand_timeout)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window)
    }
}

/// Parses `name`, falling back to `default` when unset or malformed.
fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            maps_base_url: DEFAULT_BASE_URL.to_string(),
            geocode_cache_ttl: 24 * 60 * 60,
            distance_cache_ttl: 60,
            short_link_cache_ttl: 7 * 24 * 60 * 60,
            link_expand_timeout: 10,
            provider_timeout: 15,
            rate_limit_max_requests: 50,
            rate_limit_window: 1,
        }
    }
}
