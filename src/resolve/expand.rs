//! Short-link expansion
//!
//! Map short links (`maps.app.goo.gl/...`) carry no location data until they
//! are followed. [`LinkExpander`] follows them once, caches the long form,
//! and never fails: any problem yields the original input.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::cache::{CacheStats, TtlCache};
use crate::error::FetchError;
use crate::parser::parse_url;
use crate::provider::DEFAULT_USER_AGENT;

/// Maximum redirects followed for one expansion.
const MAX_REDIRECTS: usize = 10;

const GOO_GL_MAP_PATHS: &[&str] = &["/maps", "/app/maps"];
const G_CO_MAP_PATHS: &[&str] = &["/kgs/", "/maps"];

/// Known short-link hosts, with the path prefixes that mark a map link on
/// hosts that also shorten other things. `None` means every path qualifies.
const SHORT_LINK_HOSTS: [(&str, Option<&[&str]>); 3] = [
    ("maps.app.goo.gl", None),
    ("goo.gl", Some(GOO_GL_MAP_PATHS)),
    ("g.co", Some(G_CO_MAP_PATHS)),
];

// == Short Link Detection ==
/// True when `url` points at a map short-link service.
pub fn is_short_link(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.trim_start_matches("www.");
    let path = url.path();

    SHORT_LINK_HOSTS
        .iter()
        .any(|(short_host, prefixes)| {
            host.eq_ignore_ascii_case(short_host)
                && prefixes.map_or(true, |prefixes| prefixes.iter().any(|p| path.starts_with(p)))
        })
}

// == Redirect Resolver ==
/// Follows redirects for a URL and reports where they end.
#[async_trait]
pub trait RedirectResolver: Send + Sync {
    async fn final_url(&self, url: &Url) -> Result<Url, FetchError>;
}

/// reqwest GET with redirect following and a hard timeout.
#[derive(Debug, Clone)]
pub struct HttpRedirectResolver {
    client: Client,
    timeout: Duration,
}

impl HttpRedirectResolver {
    /// # Errors
    /// Returns an error if the HTTP client fails to build.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl RedirectResolver for HttpRedirectResolver {
    async fn final_url(&self, url: &Url) -> Result<Url, FetchError> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout.as_secs())
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.url().clone())
    }
}

// == Link Expander ==
/// Cached, failure-tolerant short-link expansion.
pub struct LinkExpander {
    resolver: Arc<dyn RedirectResolver>,
    cache: Mutex<TtlCache<String>>,
}

impl LinkExpander {
    /// `cache_ttl` should be long: an expansion does not change.
    pub fn new(resolver: Arc<dyn RedirectResolver>, cache_ttl: Duration) -> Self {
        Self {
            resolver,
            cache: Mutex::new(TtlCache::new(cache_ttl)),
        }
    }

    // == Maybe Expand ==
    /// Returns the long form of a short map link, or the trimmed input
    /// unchanged when it is not a short link or expansion fails.
    pub async fn maybe_expand(&self, input: &str) -> String {
        let trimmed = input.trim();
        let Some(url) = parse_url(trimmed).filter(is_short_link) else {
            return trimmed.to_string();
        };
        let key = url.to_string();

        if let Some(expanded) = self.cache.lock().await.get(&key) {
            debug!(short = %key, "Short link cache hit");
            return expanded;
        }

        match self.resolver.final_url(&url).await {
            Ok(resolved) if !is_short_link(&resolved) => {
                let expanded = resolved.to_string();
                debug!(short = %key, long = %expanded, "Expanded short link");
                self.cache.lock().await.set(key, expanded.clone(), None);
                expanded
            }
            Ok(resolved) => {
                warn!(short = %key, last = %resolved, "Short link did not resolve; using input");
                trimmed.to_string()
            }
            Err(e) => {
                warn!(short = %key, error = %e, "Short link expansion failed; using input");
                trimmed.to_string()
            }
        }
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubResolver {
        outcome: Result<&'static str, FetchError>,
        calls: AtomicUsize,
    }

    impl StubResolver {
        fn new(outcome: Result<&'static str, FetchError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl RedirectResolver for StubResolver {
        async fn final_url(&self, _url: &Url) -> Result<Url, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Ok(target) => Ok(Url::parse(target).expect("stub target is a url")),
                Err(e) => Err(e.clone()),
            }
        }
    }

    const LONG: &str = "https://www.google.com/maps/place/Louvre/@48.8606,2.3376,17z";

    #[test]
    fn test_is_short_link() {
        let yes = [
            "https://maps.app.goo.gl/AbCdEf",
            "https://goo.gl/maps/xyz",
            "http://g.co/kgs/abc",
        ];
        let no = [
            "https://goo.gl/forms/xyz",
            "https://www.google.com/maps/@1,2,3z",
            "https://g.co/other",
        ];
        for input in yes {
            assert!(is_short_link(&Url::parse(input).unwrap()), "{input}");
        }
        for input in no {
            assert!(!is_short_link(&Url::parse(input).unwrap()), "{input}");
        }
    }

    #[tokio::test]
    async fn test_non_short_input_passes_through() {
        let resolver = StubResolver::new(Ok(LONG));
        let expander = LinkExpander::new(resolver.clone(), Duration::from_secs(60));

        assert_eq!(expander.maybe_expand("  Eiffel Tower ").await, "Eiffel Tower");
        assert_eq!(expander.maybe_expand(LONG).await, LONG);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_expansion_is_cached() {
        let resolver = StubResolver::new(Ok(LONG));
        let expander = LinkExpander::new(resolver.clone(), Duration::from_secs(60));

        let first = expander.maybe_expand("https://maps.app.goo.gl/AbCdEf").await;
        let second = expander.maybe_expand("https://maps.app.goo.gl/AbCdEf ").await;

        assert_eq!(first, LONG);
        assert_eq!(second, LONG);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
        assert_eq!(expander.cache_stats().await.hits, 1);
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_input() {
        let resolver = StubResolver::new(Err(FetchError::Timeout(10)));
        let expander = LinkExpander::new(resolver.clone(), Duration::from_secs(60));

        let input = "https://maps.app.goo.gl/AbCdEf";
        assert_eq!(expander.maybe_expand(input).await, input);
        // Failures are not cached
        assert_eq!(expander.maybe_expand(input).await, input);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unresolved_redirect_falls_back_to_input() {
        let resolver = StubResolver::new(Ok("https://maps.app.goo.gl/Other"));
        let expander = LinkExpander::new(resolver, Duration::from_secs(60));

        let input = "https://maps.app.goo.gl/AbCdEf";
        assert_eq!(expander.maybe_expand(input).await, input);
    }
}
