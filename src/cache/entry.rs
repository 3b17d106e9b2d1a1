//! Cache Entry Module
//!
//! Defines a single cache entry with an absolute expiry timestamp.

use std::time::Duration;

use chrono::Utc;

// == Cache Entry ==
/// A stored value and the instant (Unix milliseconds) after which it is stale.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at_ms: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    pub fn new(value: T, ttl: Duration) -> Self {
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        Self {
            value,
            expires_at_ms: current_timestamp_ms().saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry stays readable up to and including its expiry millisecond and
    /// is stale once the clock is strictly past it.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at_ms
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}
