//! Rate-limited provider wrapper
//!
//! Consults a shared [`FixedWindowRateLimiter`] before every upstream call.
//! Geocoding and distance lookups count against separate keys.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use super::{DistanceProvider, GeocodeProvider};
use crate::error::{ProviderError, Result};
use crate::limiter::FixedWindowRateLimiter;
use crate::models::{Coordinates, LegMeasurement, TravelMode};

/// Limiter key for geocoding calls.
pub const GEOCODE_LIMIT_KEY: &str = "provider:geocode";
/// Limiter key for distance calls.
pub const DISTANCE_LIMIT_KEY: &str = "provider:distance";

/// Requests admitted per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window: Duration,
}

/// Wraps a provider so that calls over the policy fail fast with
/// [`ProviderError::RateLimited`] instead of reaching the upstream service.
pub struct ThrottledProvider<P> {
    inner: P,
    limiter: Arc<Mutex<FixedWindowRateLimiter>>,
    policy: RateLimitPolicy,
}

impl<P> ThrottledProvider<P> {
    pub fn new(inner: P, limiter: Arc<Mutex<FixedWindowRateLimiter>>, policy: RateLimitPolicy) -> Self {
        Self {
            inner,
            limiter,
            policy,
        }
    }

    async fn admit(&self, key: &str) -> Result<()> {
        let allowed = self
            .limiter
            .lock()
            .await
            .allow(key, self.policy.max_requests, self.policy.window);

        if allowed {
            Ok(())
        } else {
            warn!(key, max_requests = self.policy.max_requests, "Provider rate limit exceeded");
            Err(ProviderError::RateLimited(key.to_string()))
        }
    }
}

#[async_trait]
impl<P: GeocodeProvider> GeocodeProvider for ThrottledProvider<P> {
    async fn geocode(&self, text: &str) -> Result<Option<Coordinates>> {
        self.admit(GEOCODE_LIMIT_KEY).await?;
        self.inner.geocode(text).await
    }
}

#[async_trait]
impl<P: DistanceProvider> DistanceProvider for ThrottledProvider<P> {
    async fn distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<LegMeasurement> {
        self.admit(DISTANCE_LIMIT_KEY).await?;
        self.inner.distance(origin, destination, mode).await
    }
}
