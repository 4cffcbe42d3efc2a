//! Feed Cache Module
//!
//! Serves the latest posts from a fresh cache entry when possible, otherwise
//! fetches through the conversion API and falls back to any cached batch when
//! that fails.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, FeedStats, CACHE_KEY, FRESHNESS_WINDOW, MAX_ITEMS};
use crate::clock::Clock;
use crate::error::FeedError;
use crate::feed::{normalize_batch, FeedEndpoint, FeedItem, FeedResponse, HttpClient};
use crate::storage::KeyValueStore;

// == Load Outcome ==
/// What the rendering layer displays after a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Posts to show, possibly empty
    pub items: Vec<FeedItem>,
    /// True only when the fetch failed and nothing was cached
    pub degraded: bool,
    /// Set together with `degraded`
    pub error: Option<FeedError>,
}

impl LoadOutcome {
    fn ready(items: Vec<FeedItem>) -> Self {
        Self {
            items,
            degraded: false,
            error: None,
        }
    }

    fn unavailable(cause: FeedError) -> Self {
        Self {
            items: Vec::new(),
            degraded: true,
            error: Some(FeedError::NoDataAvailable(Box::new(cause))),
        }
    }

    /// User-facing error text, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

// == Feed Cache ==
/// Fetch-with-cache for the blog feed.
///
/// All I/O goes through the injected [`HttpClient`], [`KeyValueStore`] and
/// [`Clock`]. Storage faults never reach the caller.
pub struct FeedCache {
    endpoint: FeedEndpoint,
    http: Arc<dyn HttpClient>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    freshness_window: Duration,
    max_items: usize,
    stats: Mutex<FeedStats>,
}

impl FeedCache {
    // == Constructor ==
    /// Creates a cache with the default 30 minute window and 4 item limit.
    pub fn new(
        endpoint: FeedEndpoint,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            endpoint,
            http,
            store,
            clock,
            freshness_window: FRESHNESS_WINDOW,
            max_items: MAX_ITEMS,
            stats: Mutex::new(FeedStats::new()),
        }
    }

    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.freshness_window = window;
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn endpoint(&self) -> &FeedEndpoint {
        &self.endpoint
    }

    // == Load ==
    /// Produces the most recent usable batch of posts.
    ///
    /// Order of precedence: fresh cache, network, stale cache, empty with an
    /// error. A stale batch is returned without any error.
    pub async fn load(&self) -> LoadOutcome {
        if let Some(entry) = self.read_entry() {
            let now = self.clock.now_ms();
            if entry.is_fresh(now, self.freshness_window) {
                debug!(
                    "Serving {} cached posts (age {}ms)",
                    entry.data.len(),
                    entry.age_ms(now)
                );
                self.record(FeedStats::record_fresh_hit);
                return LoadOutcome::ready(entry.data);
            }
        }

        let err = match self.fetch().await {
            Ok(Some(items)) => {
                self.write_entry(&items);
                return LoadOutcome::ready(items);
            }
            Ok(None) => {
                debug!("Feed response carried no items");
                return LoadOutcome::ready(Vec::new());
            }
            Err(err) => err,
        };

        warn!("Error fetching blog posts: {}", err);

        match self.read_entry() {
            Some(entry) => {
                info!("Falling back to {} stale cached posts", entry.data.len());
                self.record(FeedStats::record_stale_fallback);
                LoadOutcome::ready(entry.data)
            }
            None => {
                self.record(FeedStats::record_failure);
                LoadOutcome::unavailable(err)
            }
        }
    }

    // == Stats ==
    /// Returns a snapshot of the load counters.
    pub fn stats(&self) -> FeedStats {
        self.stats.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Issues the request and validates the response.
    ///
    /// `Ok(None)` means a successful body without an `items` field.
    async fn fetch(&self) -> Result<Option<Vec<FeedItem>>, FeedError> {
        let url = self.endpoint.request_url();
        debug!("Fetching feed from {}", url);
        self.record(FeedStats::record_fetch);

        let response = self.http.get(&url).await.map_err(|err| {
            warn!("Feed request failed: {}", err);
            FeedError::FetchFailed
        })?;

        if !response.is_success() {
            debug!("Feed request returned status {}", response.status);
            return Err(if response.is_rate_limited() {
                FeedError::RateLimited
            } else {
                FeedError::FetchFailed
            });
        }

        let body: FeedResponse = serde_json::from_str(&response.body).map_err(|err| {
            warn!("Feed response was not valid JSON: {}", err);
            FeedError::FetchFailed
        })?;

        if body.is_error() {
            return Err(FeedError::upstream(body.message));
        }

        Ok(body
            .items
            .map(|items| normalize_batch(&items, self.max_items)))
    }

    /// Reads the cached entry; any fault reads as absent.
    fn read_entry(&self) -> Option<CacheEntry> {
        let text = match self.store.get(CACHE_KEY) {
            Ok(text) => text?,
            Err(err) => {
                debug!("Cache read skipped: {}", err);
                return None;
            }
        };

        match CacheEntry::from_json(&text) {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("Ignoring unreadable cache entry: {}", err);
                None
            }
        }
    }

    /// Replaces the cached entry; failures are logged and dropped.
    fn write_entry(&self, items: &[FeedItem]) {
        let entry = CacheEntry::new(items.to_vec(), self.clock.now_ms());
        let result = entry
            .to_json()
            .and_then(|text| self.store.set(CACHE_KEY, &text));

        if let Err(err) = result {
            debug!("Cache write skipped: {}", err);
        }
    }

    fn record(&self, update: impl FnOnce(&mut FeedStats)) {
        if let Ok(mut stats) = self.stats.lock() {
            update(&mut stats);
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::{StoreError, TransportError, FETCH_FAILED_MESSAGE, RATE_LIMITED_MESSAGE};
    use crate::feed::HttpResponse;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const NOW: u64 = 1_700_000_000_000;

    /// Answers every request with the same canned result.
    struct StubHttp {
        status: u16,
        body: String,
        calls: AtomicUsize,
    }

    impl StubHttp {
        fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.to_string(),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HttpClient for StubHttp {
        async fn get(&self, _url: &str) -> Result<HttpResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse::new(self.status, self.body.clone()))
        }
    }

    struct DownHttp;

    #[async_trait]
    impl HttpClient for DownHttp {
        async fn get(&self, _url: &str) -> Result<HttpResponse, TransportError> {
            Err(TransportError::Timeout)
        }
    }

    /// A store whose medium is never reachable.
    struct UnavailableStore;

    impl KeyValueStore for UnavailableStore {
        fn get(&self, _key: &str) -> std::result::Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("private browsing".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> std::result::Result<(), StoreError> {
            Err(StoreError::Unavailable("private browsing".to_string()))
        }
    }

    fn ok_body(count: usize) -> String {
        let items: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "title": format!("Post {i}"),
                    "pubDate": "2024-01-15 10:30:00",
                    "link": format!("https://medium.com/@me/post-{i}"),
                    "thumbnail": "",
                    "content": format!(r#"<img src="https://cdn/{i}.png">"#),
                    "categories": ["rust"]
                })
            })
            .collect();
        serde_json::json!({ "status": "ok", "items": items }).to_string()
    }

    fn cached_item(title: &str) -> FeedItem {
        FeedItem {
            title: title.to_string(),
            pub_date: "2023-12-01 09:00:00".to_string(),
            link: "https://medium.com/@me/cached".to_string(),
            thumbnail: String::new(),
            categories: Vec::new(),
        }
    }

    fn seed(store: &MemoryStore, timestamp: u64) {
        let entry = CacheEntry::new(vec![cached_item("Cached")], timestamp);
        store.set(CACHE_KEY, &entry.to_json().unwrap()).unwrap();
    }

    fn build(http: Arc<dyn HttpClient>, store: Arc<dyn KeyValueStore>) -> FeedCache {
        FeedCache::new(
            FeedEndpoint::new("https://api.example/v1/api.json", "https://medium.com/feed/@me"),
            http,
            store,
            Arc::new(ManualClock::new(NOW)),
        )
    }

    #[tokio::test]
    async fn test_fresh_entry_skips_network() {
        let http = StubHttp::new(200, &ok_body(2));
        let store = Arc::new(MemoryStore::new());
        seed(&store, NOW - 60_000);

        let outcome = build(http.clone(), store).load().await;

        assert_eq!(http.calls(), 0);
        assert_eq!(outcome.items, vec![cached_item("Cached")]);
        assert!(!outcome.degraded);
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_fetch_normalizes_truncates_and_caches() {
        let http = StubHttp::new(200, &ok_body(6));
        let store = Arc::new(MemoryStore::new());
        let cache = build(http.clone(), store.clone());

        let outcome = cache.load().await;

        assert_eq!(http.calls(), 1);
        assert_eq!(outcome.items.len(), 4);
        assert_eq!(outcome.items[0].thumbnail, "https://cdn/0.png");

        let written = CacheEntry::from_json(&store.get(CACHE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(written.timestamp, NOW);
        assert_eq!(written.data, outcome.items);

        let stats = cache.stats();
        assert_eq!(stats.network_fetches, 1);
        assert_eq!(stats.fresh_hits, 0);
    }

    #[tokio::test]
    async fn test_rate_limit_without_cache() {
        let outcome = build(StubHttp::new(429, ""), Arc::new(MemoryStore::new()))
            .load()
            .await;

        assert!(outcome.degraded);
        assert!(outcome.items.is_empty());
        assert_eq!(outcome.error_message().as_deref(), Some(RATE_LIMITED_MESSAGE));
    }

    #[tokio::test]
    async fn test_server_error_without_cache() {
        let outcome = build(StubHttp::new(503, "oops"), Arc::new(MemoryStore::new()))
            .load()
            .await;

        assert_eq!(outcome.error_message().as_deref(), Some(FETCH_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_upstream_error_message_is_surfaced() {
        let body = r#"{"status":"error","message":"Cannot download this RSS feed"}"#;
        let outcome = build(StubHttp::new(200, body), Arc::new(MemoryStore::new()))
            .load()
            .await;

        assert_eq!(
            outcome.error,
            Some(FeedError::NoDataAvailable(Box::new(
                FeedError::UpstreamReportedError("Cannot download this RSS feed".to_string())
            )))
        );
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_fetch_failure() {
        let outcome = build(StubHttp::new(200, "<html>"), Arc::new(MemoryStore::new()))
            .load()
            .await;

        assert_eq!(outcome.error_message().as_deref(), Some(FETCH_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_transport_fault_falls_back_to_stale() {
        let store = Arc::new(MemoryStore::new());
        seed(&store, NOW - 24 * 60 * 60 * 1000);
        let cache = build(Arc::new(DownHttp), store);

        let outcome = cache.load().await;

        assert_eq!(outcome.items, vec![cached_item("Cached")]);
        assert!(!outcome.degraded);
        assert!(outcome.error.is_none());
        assert_eq!(cache.stats().stale_fallbacks, 1);
    }

    #[tokio::test]
    async fn test_missing_items_is_empty_and_not_cached() {
        let store = Arc::new(MemoryStore::new());
        let outcome = build(StubHttp::new(200, r#"{"status":"ok"}"#), store.clone())
            .load()
            .await;

        assert!(outcome.items.is_empty());
        assert!(!outcome.degraded);
        assert!(store.get(CACHE_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unavailable_store_still_fetches() {
        let http = StubHttp::new(200, &ok_body(3));
        let outcome = build(http.clone(), Arc::new(UnavailableStore)).load().await;

        assert_eq!(http.calls(), 1);
        assert_eq!(outcome.items.len(), 3);
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss() {
        let http = StubHttp::new(200, &ok_body(1));
        let store = Arc::new(MemoryStore::new());
        store.set(CACHE_KEY, "{corrupt").unwrap();

        let outcome = build(http.clone(), store).load().await;

        assert_eq!(http.calls(), 1);
        assert_eq!(outcome.items.len(), 1);
    }

    #[tokio::test]
    async fn test_custom_limits() {
        let http = StubHttp::new(200, &ok_body(5));
        let store = Arc::new(MemoryStore::new());
        seed(&store, NOW - 10_000);

        let cache = build(http.clone(), store)
            .with_freshness_window(Duration::from_secs(5))
            .with_max_items(2);
        let outcome = cache.load().await;

        assert_eq!(http.calls(), 1);
        assert_eq!(outcome.items.len(), 2);
    }
}
