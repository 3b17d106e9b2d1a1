//! Cache Statistics Module
//!
//! Per-cache counters. A lookup lands in exactly one [`Lookup`] bucket.

use std::fmt;

use serde::Serialize;

/// Outcome of a single cache read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Hit,
    Miss,
    /// Entry was present but stale; counted as a miss too
    Expired,
}

// == Cache Stats ==
/// Snapshot of one cache's read outcomes and size.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    /// Absent or expired reads
    pub misses: u64,
    /// Stale entries dropped by the read that found them
    pub expirations: u64,
    /// Entries held when the snapshot was taken, stale ones included
    pub total_entries: usize,
}

impl CacheStats {
    pub fn record(&mut self, lookup: Lookup) {
        match lookup {
            Lookup::Hit => self.hits += 1,
            Lookup::Miss => self.misses += 1,
            Lookup::Expired => {
                self.misses += 1;
                self.expirations += 1;
            }
        }
    }

    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// hits / lookups, `0.0` before the first read.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries, {}/{} hits ({:.0}%), {} expired",
            self.total_entries,
            self.hits,
            self.lookups(),
            self.hit_rate() * 100.0,
            self.expirations
        )
    }
}
