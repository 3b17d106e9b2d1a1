//! Google Maps HTTP provider
//!
//! Implements [`GeocodeProvider`] against the Geocoding API and
//! [`DistanceProvider`] against the Distance Matrix API with
//! `departure_time=now`, so driving legs carry live-traffic durations.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{DistanceMatrixResponse, GeocodeResponse};
use super::{DistanceProvider, GeocodeProvider};
use crate::error::{ProviderError, Result};
use crate::models::{Coordinates, LegMeasurement, TravelMode};

/// Default Google Maps Platform host.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Default user agent for provider requests.
pub const DEFAULT_USER_AGENT: &str = "landmark-matrix/0.1";

const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const DISTANCE_MATRIX_PATH: &str = "/maps/api/distancematrix/json";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

// == Config ==
/// Configuration for [`GoogleMapsClient`].
#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Scheme and host, e.g. `"https://maps.googleapis.com"`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl GoogleMapsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// == Client ==
/// reqwest-backed Google Maps client.
#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    inner: Client,
    config: GoogleMapsConfig,
}

impl GoogleMapsClient {
    /// Builds a client.
    ///
    /// # Errors
    /// `MissingCredential` when the API key is blank, `ClientBuild` when the
    /// HTTP client cannot be constructed.
    pub fn new(config: GoogleMapsConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredential(
                "GOOGLE_MAPS_API_KEY".to_string(),
            ));
        }

        let inner = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;

        Ok(Self { inner, config })
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// GETs `path` with `params` plus the API key and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let response = self
            .inner
            .get(self.endpoint_url(path))
            .query(params)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| self.convert_reqwest_error(e, path))?
            .error_for_status()
            .map_err(|e| self.convert_reqwest_error(e, path))?;

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }

    /// Maps a reqwest failure to a `ProviderError`. Only the path is kept so
    /// the API key never ends up in an error message.
    fn convert_reqwest_error(&self, error: reqwest::Error, path: &str) -> ProviderError {
        if error.is_timeout() {
            return ProviderError::Timeout {
                endpoint: path.to_string(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return ProviderError::Http {
                endpoint: path.to_string(),
                status: status.as_u16(),
            };
        }

        ProviderError::Network {
            endpoint: path.to_string(),
            message: error.without_url().to_string(),
        }
    }
}

#[async_trait]
impl GeocodeProvider for GoogleMapsClient {
    async fn geocode(&self, text: &str) -> Result<Option<Coordinates>> {
        debug!(text, "Geocoding request");
        let response: GeocodeResponse = self
            .get_json(GEOCODE_PATH, &[("address", text.to_string())])
            .await?;
        response.into_outcome()
    }
}

#[async_trait]
impl DistanceProvider for GoogleMapsClient {
    async fn distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<LegMeasurement> {
        debug!(%origin, %destination, %mode, "Distance request");
        let params = [
            ("origins", origin.to_string()),
            ("destinations", destination.to_string()),
            ("mode", mode.as_str().to_string()),
            ("departure_time", "now".to_string()),
        ];
        let response: DistanceMatrixResponse = self.get_json(DISTANCE_MATRIX_PATH, &params).await?;
        response.into_measurement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_missing_credential() {
        let err = GoogleMapsClient::new(GoogleMapsConfig::new("  ")).unwrap_err();
        assert_eq!(
            err,
            ProviderError::MissingCredential("GOOGLE_MAPS_API_KEY".to_string())
        );
    }

    #[test]
    fn test_endpoint_url_strips_trailing_slash() {
        let client = GoogleMapsClient::new(
            GoogleMapsConfig::new("key").with_base_url("http://localhost:8080/"),
        )
        .unwrap();
        assert_eq!(
            client.endpoint_url(GEOCODE_PATH),
            "http://localhost:8080/maps/api/geocode/json"
        );
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = GoogleMapsConfig::new("abc")
            .with_base_url("http://example.com")
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }
}
