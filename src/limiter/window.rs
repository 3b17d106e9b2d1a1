//! Fixed-window rate limiter
//!
//! Each key owns a counter and a reset instant. The window is hard: a burst
//! straddling a boundary can admit up to twice `max_requests` in a short
//! span, which is accepted for coarse abuse prevention.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::current_timestamp_ms;

// == Rate Limit Bucket ==
/// Counter state for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitBucket {
    /// Requests admitted in the current window
    pub count: u32,
    /// Unix milliseconds after which the window restarts
    pub reset_at_ms: u64,
}

// == Fixed Window Rate Limiter ==
/// Per-key fixed-window counter.
///
/// Buckets are created on first use and replaced when their window elapses.
/// They are never removed by `allow`; see [`FixedWindowRateLimiter::purge_elapsed`].
#[derive(Debug, Default)]
pub struct FixedWindowRateLimiter {
    buckets: HashMap<String, RateLimitBucket>,
}

impl FixedWindowRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    // == Allow ==
    /// Records a request for `key` and reports whether it is admitted.
    ///
    /// A denied request does not increment the counter. A `max_requests` of
    /// zero denies everything and creates no bucket.
    pub fn allow(&mut self, key: &str, max_requests: u32, window: Duration) -> bool {
        self.allow_at(key, max_requests, window, current_timestamp_ms())
    }

    /// [`allow`](Self::allow) evaluated at an explicit clock reading.
    pub fn allow_at(&mut self, key: &str, max_requests: u32, window: Duration, now_ms: u64) -> bool {
        if max_requests == 0 {
            return false;
        }

        let window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        let fresh = RateLimitBucket {
            count: 1,
            reset_at_ms: now_ms.saturating_add(window_ms),
        };

        if let Some(bucket) = self.buckets.get_mut(key) {
            if now_ms <= bucket.reset_at_ms {
                if bucket.count >= max_requests {
                    return false;
                }
                bucket.count += 1;
                return true;
            }
        }

        self.buckets.insert(key.to_string(), fresh);
        true
    }

    /// Current bucket for `key`, if one has been created.
    pub fn bucket(&self, key: &str) -> Option<RateLimitBucket> {
        self.buckets.get(key).copied()
    }

    // == Purge Elapsed ==
    /// Drops buckets whose window has already elapsed, returning how many
    /// were removed. Only needed for long-lived, high-cardinality keys.
    pub fn purge_elapsed(&mut self) -> usize {
        let now_ms = current_timestamp_ms();
        let before = self.buckets.len();
        self.buckets.retain(|_, bucket| now_ms <= bucket.reset_at_ms);
        before - self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const WINDOW: Duration = Duration::from_millis(1000);

    #[test]
    fn test_allows_up_to_max_then_denies() {
        let mut limiter = FixedWindowRateLimiter::new();

        assert!(limiter.allow_at("k", 3, WINDOW, 10_000));
        assert!(limiter.allow_at("k", 3, WINDOW, 10_100));
        assert!(limiter.allow_at("k", 3, WINDOW, 10_200));
        assert!(!limiter.allow_at("k", 3, WINDOW, 10_300));

        // Denial leaves the count untouched
        assert_eq!(limiter.bucket("k").unwrap().count, 3);
    }

    #[test]
    fn test_window_elapse_starts_fresh_bucket() {
        let mut limiter = FixedWindowRateLimiter::new();

        for _ in 0..3 {
            assert!(limiter.allow_at("k", 3, WINDOW, 10_000));
        }
        assert!(!limiter.allow_at("k", 3, WINDOW, 11_000));

        assert!(limiter.allow_at("k", 3, WINDOW, 11_001));
        assert_eq!(
            limiter.bucket("k"),
            Some(RateLimitBucket {
                count: 1,
                reset_at_ms: 12_001,
            })
        );
    }

    #[test]
    fn test_zero_max_denies_every_call() {
        let mut limiter = FixedWindowRateLimiter::new();

        assert!(!limiter.allow_at("k", 0, WINDOW, 0));
        assert!(!limiter.allow_at("k", 0, WINDOW, 5_000));
        assert!(limiter.bucket("k").is_none());
    }

    #[test]
    fn test_keys_are_independent() {
        let mut limiter = FixedWindowRateLimiter::new();

        assert!(limiter.allow_at("a", 1, WINDOW, 0));
        assert!(!limiter.allow_at("a", 1, WINDOW, 1));
        assert!(limiter.allow_at("b", 1, WINDOW, 1));
        assert_eq!(limiter.len(), 2);
    }

    #[test]
    fn test_boundary_burst_is_admitted() {
        let mut limiter = FixedWindowRateLimiter::new();

        // Two full windows back to back admit 2 x max within ~2ms
        assert!(limiter.allow_at("k", 2, WINDOW, 0));
        assert!(limiter.allow_at("k", 2, WINDOW, 999));
        assert!(limiter.allow_at("k", 2, WINDOW, 1_001));
        assert!(limiter.allow_at("k", 2, WINDOW, 1_001));
        assert!(!limiter.allow_at("k", 2, WINDOW, 1_001));
    }

    #[test]
    fn test_allow_with_wall_clock() {
        let mut limiter = FixedWindowRateLimiter::new();
        let window = Duration::from_millis(50);

        assert!(limiter.allow("k", 3, window));
        assert!(limiter.allow("k", 3, window));
        assert!(limiter.allow("k", 3, window));
        assert!(!limiter.allow("k", 3, window));

        sleep(Duration::from_millis(80));

        assert!(limiter.allow("k", 3, window));
        assert_eq!(limiter.bucket("k").unwrap().count, 1);
    }

    #[test]
    fn test_purge_elapsed() {
        let mut limiter = FixedWindowRateLimiter::new();

        limiter.allow("short", 5, Duration::from_millis(10));
        limiter.allow("long", 5, Duration::from_secs(60));
        sleep(Duration::from_millis(30));

        assert_eq!(limiter.purge_elapsed(), 1);
        assert!(limiter.bucket("short").is_none());
        assert!(limiter.bucket("long").is_some());
    }
}
