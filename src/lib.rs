//! Landmark Matrix - location resolution and traffic-aware travel times
//!
//! Resolves map links and place text to coordinates, and measures travel
//! between a target and a set of landmarks in both directions, with caching
//! and rate limiting in front of the external provider.

pub mod cache;
pub mod config;
pub mod error;
pub mod limiter;
pub mod matrix;
pub mod models;
pub mod parser;
pub mod provider;
pub mod resolve;
pub mod services;

pub use config::Config;
pub use error::{FetchError, ProviderError};
pub use models::{Coordinates, DistancePoint, Landmark, TravelLegResult, TravelMode};
pub use services::Services;
