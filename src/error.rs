//! Error types for the resolution and travel matrix core
//!
//! Provides unified error handling using thiserror. "No geocoding result" is
//! not an error: it is reported as `Ok(None)` by the resolver.

use thiserror::Error;

// == Provider Error Enum ==
/// Failure of a geocoding or distance provider call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Provider cannot be used because a credential is not configured
    #[error("Missing provider credential: {0}")]
    MissingCredential(String),

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Request did not complete within the configured timeout
    #[error("Request to {endpoint} timed out after {timeout_secs}s")]
    Timeout { endpoint: String, timeout_secs: u64 },

    /// Transport-level failure (connection refused, DNS, aborted body)
    #[error("Network error calling {endpoint}: {message}")]
    Network { endpoint: String, message: String },

    /// Non-success HTTP status
    #[error("HTTP {status} from {endpoint}")]
    Http { endpoint: String, status: u16 },

    /// Provider answered with a status other than OK / ZERO_RESULTS
    #[error("Provider returned status {status}: {message}")]
    Status { status: String, message: String },

    /// Route element for an origin/destination pair was not usable
    #[error("Route element status {0}")]
    ElementStatus(String),

    /// Response body was malformed or missing required fields
    #[error("Malformed provider response: {0}")]
    Parse(String),

    /// Local rate limiter refused the call
    #[error("Rate limit exceeded for {0}")]
    RateLimited(String),
}

// == Fetch Error Enum ==
/// Failure of the redirect-following fetch used for short-link expansion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Fetch timed out after {0}s")]
    Timeout(u64),

    #[error("Fetch failed: {0}")]
    Network(String),

    #[error("Fetch returned HTTP {0}")]
    Status(u16),
}

// == Result Type Alias ==
/// Convenience Result type for provider-backed operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
