//! Cache Module
//!
//! Generic in-memory key/value cache with per-entry expiry. Expired entries
//! are reclaimed lazily by the read that finds them stale; there is no
//! background sweep and no capacity eviction.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use stats::{CacheStats, Lookup};
pub use store::TtlCache;
