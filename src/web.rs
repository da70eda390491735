//! Web Cache Module
//!
//! Cache-or-fetch wrapper over an HTTP text fetcher, with a per-URL access
//! counter and store-delegated TTL expiry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::Result;
use crate::store::StoreHandle;
use crate::wrap::read_count;

// == Key Scheme ==
/// Store key of a URL's cached response body.
pub fn cached_key(url: &str) -> String {
    format!("cached:{url}")
}

/// Store key of a URL's access counter.
pub fn count_key(url: &str) -> String {
    format!("count:{url}")
}

// == Fetcher Trait ==
/// Text fetcher collaborator behind the page cache.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the text body at `url`. Unreachable hosts and timeouts fail
    /// with a fetch error.
    async fn get_text(&self, url: &str) -> Result<String>;
}

// == HTTP Fetcher ==
/// Real fetcher backed by a reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // == Constructor ==
    /// Creates a fetcher with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_text(&self, url: &str) -> Result<String> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

// == Page Cache ==
/// TTL cache over a fetcher.
///
/// Every access increments the URL's access counter, hit or miss: the
/// counter measures total demand, not fetch cost. On a miss the body is
/// fetched, written with the configured TTL, and returned; expiry back to
/// absent is entirely the store's job.
pub struct PageCache<F> {
    store: StoreHandle,
    fetcher: F,
    ttl: Duration,
}

impl<F: Fetcher> PageCache<F> {
    // == Constructor ==
    /// Creates a page cache over the given store and fetcher.
    pub fn new(store: StoreHandle, fetcher: F, ttl: Duration) -> Self {
        Self {
            store,
            fetcher,
            ttl,
        }
    }

    // == Get Page ==
    /// Returns the body at `url`, served from cache when a live entry
    /// exists.
    pub async fn get_page(&self, url: &str) -> Result<String> {
        self.store.increment(&count_key(url))?;

        if let Some(body) = self.store.get(&cached_key(url))? {
            debug!(url, "page cache hit");
            return Ok(String::from_utf8(body).unwrap_or_default());
        }

        debug!(url, "page cache miss, fetching");
        let body = self.fetcher.get_text(url).await?;
        self.store
            .set_with_expiry(&cached_key(url), body.as_bytes(), self.ttl)?;

        Ok(body)
    }

    // == Access Count ==
    /// Reads how many times `url` has been accessed, hits included.
    ///
    /// An absent or undecodable counter reads as 0.
    pub fn access_count(&self, url: &str) -> Result<i64> {
        read_count(&self.store, &count_key(url))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::error::StoreError;
    use crate::store::MemoryStore;

    /// Fake fetcher returning a canned body and counting fetches.
    struct FakeFetcher {
        body: String,
        fail: bool,
        fetches: AtomicUsize,
    }

    impl FakeFetcher {
        fn returning(body: &str) -> Self {
            Self {
                body: body.to_string(),
                fail: false,
                fetches: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                body: String::new(),
                fail: true,
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for &FakeFetcher {
        async fn get_text(&self, _url: &str) -> Result<String> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(StoreError::Unavailable("host unreachable".to_string()))
            } else {
                Ok(self.body.clone())
            }
        }
    }

    fn test_store() -> StoreHandle {
        StoreHandle::new(MemoryStore::new())
    }

    #[test]
    fn test_key_scheme() {
        assert_eq!(cached_key("http://a.test"), "cached:http://a.test");
        assert_eq!(count_key("http://a.test"), "count:http://a.test");
    }

    #[tokio::test]
    async fn test_second_access_within_ttl_is_a_hit() {
        let fetcher = FakeFetcher::returning("<html>ok</html>");
        let cache = PageCache::new(test_store(), &fetcher, Duration::from_secs(60));

        let first = cache.get_page("http://a.test").await.unwrap();
        let second = cache.get_page("http://a.test").await.unwrap();

        assert_eq!(first, "<html>ok</html>");
        assert_eq!(second, "<html>ok</html>");
        assert_eq!(fetcher.fetch_count(), 1);
        assert_eq!(cache.access_count("http://a.test").unwrap(), 2);
    }

    #[tokio::test]
    async fn test_access_past_ttl_refetches() {
        let fetcher = FakeFetcher::returning("<html>ok</html>");
        let cache = PageCache::new(test_store(), &fetcher, Duration::from_millis(100));

        cache.get_page("http://a.test").await.unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        cache.get_page("http://a.test").await.unwrap();

        assert_eq!(fetcher.fetch_count(), 2);
        assert_eq!(cache.access_count("http://a.test").unwrap(), 2);
    }

    #[tokio::test]
    async fn test_urls_are_cached_independently() {
        let fetcher = FakeFetcher::returning("<html>ok</html>");
        let cache = PageCache::new(test_store(), &fetcher, Duration::from_secs(60));

        cache.get_page("http://a.test").await.unwrap();
        cache.get_page("http://b.test").await.unwrap();

        assert_eq!(fetcher.fetch_count(), 2);
        assert_eq!(cache.access_count("http://a.test").unwrap(), 1);
        assert_eq!(cache.access_count("http://b.test").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates_and_is_not_cached() {
        let fetcher = FakeFetcher::failing();
        let cache = PageCache::new(test_store(), &fetcher, Duration::from_secs(60));

        assert!(cache.get_page("http://down.test").await.is_err());
        assert!(cache.get_page("http://down.test").await.is_err());

        // Failures are never cached, and every attempt still counts
        assert_eq!(fetcher.fetch_count(), 2);
        assert_eq!(cache.access_count("http://down.test").unwrap(), 2);
    }

    #[tokio::test]
    async fn test_long_url_is_cached() {
        let fetcher = FakeFetcher::returning("<html>ok</html>");
        let cache = PageCache::new(test_store(), &fetcher, Duration::from_secs(60));
        let url = format!("http://example.test/{}", "a".repeat(280));

        // URL-derived keys have no length ceiling
        let body = cache.get_page(&url).await.unwrap();
        cache.get_page(&url).await.unwrap();

        assert_eq!(body, "<html>ok</html>");
        assert_eq!(fetcher.fetch_count(), 1);
        assert_eq!(cache.access_count(&url).unwrap(), 2);
    }

    #[test]
    fn test_access_count_unvisited_url_is_zero() {
        let fetcher = FakeFetcher::returning("");
        let cache = PageCache::new(test_store(), &fetcher, Duration::from_secs(60));

        assert_eq!(cache.access_count("http://never.test").unwrap(), 0);
    }
}
