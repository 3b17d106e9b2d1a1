//! Provider contracts
//!
//! The core never talks to a vendor directly. It depends on these two async
//! traits; [`GoogleMapsClient`] is the HTTP implementation and
//! [`ThrottledProvider`] layers the fixed-window rate limiter over any of them.

mod google;
mod throttle;
mod types;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Coordinates, LegMeasurement, TravelMode};

pub use google::{GoogleMapsClient, GoogleMapsConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use throttle::{RateLimitPolicy, ThrottledProvider, DISTANCE_LIMIT_KEY, GEOCODE_LIMIT_KEY};
pub use types::{DistanceMatrixResponse, GeocodeResponse};

// == Geocode Provider ==
/// Forward geocoding of free text.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Resolves `text` to coordinates.
    ///
    /// `Ok(None)` means the provider found nothing for this text, which
    /// callers treat as "try the next candidate". Any other provider status
    /// is an `Err`.
    async fn geocode(&self, text: &str) -> Result<Option<Coordinates>>;
}

// == Distance Provider ==
/// Directed distance/duration lookup departing now.
#[async_trait]
pub trait DistanceProvider: Send + Sync {
    /// Returns metrics for the single leg `origin -> destination`.
    ///
    /// Only a fully usable route element is returned as `Ok`.
    async fn distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<LegMeasurement>;
}

#[async_trait]
impl<P: GeocodeProvider + ?Sized> GeocodeProvider for Arc<P> {
    async fn geocode(&self, text: &str) -> Result<Option<Coordinates>> {
        (**self).geocode(text).await
    }
}

#[async_trait]
impl<P: DistanceProvider + ?Sized> DistanceProvider for Arc<P> {
    async fn distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<LegMeasurement> {
        (**self).distance(origin, destination, mode).await
    }
}
