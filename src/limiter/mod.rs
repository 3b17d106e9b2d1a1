//! Rate Limiter Module
//!
//! Fixed-window request counting per key. Used to cap how often the external
//! provider is called.

mod window;

pub use window::{FixedWindowRateLimiter, RateLimitBucket};
