//! Cache Store Module
//!
//! HashMap-backed cache with strict (non-sliding) per-entry expiry.

use std::collections::HashMap;
use std::time::Duration;

use tracing::trace;

use crate::cache::{CacheEntry, CacheStats, Lookup};

// == TTL Cache ==
/// Key/value cache whose entries expire a fixed time after they were set.
///
/// Reads never extend an entry's lifetime. Stale entries are dropped by the
/// `get` that discovers them; nothing else reclaims them.
#[derive(Debug)]
pub struct TtlCache<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Performance statistics
    stats: CacheStats,
    /// TTL applied when `set` is called without an override
    default_ttl: Duration,
}

impl<T: Clone> TtlCache<T> {
    // == Constructor ==
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::default(),
            default_ttl,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any existing entry and its expiry.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional lifetime override (uses `default_ttl` if None)
    pub fn set(&mut self, key: impl Into<String>, value: T, ttl: Option<Duration>) {
        let entry = CacheEntry::new(value, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key.into(), entry);
    }

    // == Get ==
    /// Returns a clone of the value for `key` if present and not expired.
    ///
    /// An expired entry is removed and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<T> {
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record(Lookup::Miss);
                return None;
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            self.entries.remove(key);
            self.stats.record(Lookup::Expired);
            trace!(key, "Cache entry expired");
            return None;
        }

        self.stats.record(Lookup::Hit);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            ..self.stats.clone()
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Length ==
    /// Number of stored entries, including expired entries not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
