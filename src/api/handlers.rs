//! API Handlers
//!
//! HTTP request handlers for each feed service endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::cache::FeedCache;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::error::TransportError;
use crate::feed::{FeedEndpoint, ReqwestClient};
use crate::models::{BlogResponse, HealthResponse, StatsResponse};
use crate::storage::FileStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Fetch-with-cache for the blog feed
    pub feed: Arc<FeedCache>,
    /// Blog home shown when no posts can be loaded
    pub profile_url: String,
}

impl AppState {
    /// Creates a new AppState around an assembled feed cache.
    pub fn new(feed: FeedCache, profile_url: impl Into<String>) -> Self {
        Self {
            feed: Arc::new(feed),
            profile_url: profile_url.into(),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wires a reqwest client with the configured timeout, a file store under
    /// `cache_dir` and the system clock.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let http = ReqwestClient::new(config.timeout())?;
        let feed = FeedCache::new(
            FeedEndpoint::new(&config.api_url, &config.feed_url),
            Arc::new(http),
            Arc::new(FileStore::new(&config.cache_dir)),
            Arc::new(SystemClock),
        )
        .with_freshness_window(config.freshness_window())
        .with_max_items(config.max_posts);

        Ok(Self::new(feed, &config.profile_url))
    }
}

/// Handler for GET /api/blog
///
/// Loads the latest posts. Always answers 200; failures show up as
/// `degraded` with an `error` message.
pub async fn blog_handler(State(state): State<AppState>) -> Json<BlogResponse> {
    let outcome = state.feed.load().await;
    Json(BlogResponse::new(&outcome, state.profile_url.as_str()))
}

/// Handler for GET /stats
///
/// Returns how loads have been served so far.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.feed.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::feed::{HttpClient, HttpResponse};
    use crate::storage::MemoryStore;
    use async_trait::async_trait;

    struct FixedHttp(HttpResponse);

    #[async_trait]
    impl HttpClient for FixedHttp {
        async fn get(&self, _url: &str) -> Result<HttpResponse, TransportError> {
            Ok(self.0.clone())
        }
    }

    fn state_with(status: u16, body: &str) -> AppState {
        let feed = FeedCache::new(
            FeedEndpoint::new("https://api.example/v1/api.json", "https://medium.com/feed/@me"),
            Arc::new(FixedHttp(HttpResponse::new(status, body))),
            Arc::new(MemoryStore::new()),
            Arc::new(ManualClock::new(1_700_000_000_000)),
        );
        AppState::new(feed, "https://me.medium.com/")
    }

    #[tokio::test]
    async fn test_blog_handler_success() {
        let body = r#"{"status":"ok","items":[{"title":"Hi","pubDate":"2024-01-15 10:30:00","link":"https://m/1","categories":[]}]}"#;
        let state = state_with(200, body);

        let response = blog_handler(State(state)).await;
        assert_eq!(response.posts.len(), 1);
        assert_eq!(response.posts[0].date, "January 15, 2024");
        assert!(!response.degraded);
    }

    #[tokio::test]
    async fn test_blog_handler_degraded() {
        let state = state_with(500, "");

        let response = blog_handler(State(state)).await;
        assert!(response.degraded);
        assert!(response.error.is_some());
        assert_eq!(response.profile_url, "https://me.medium.com/");
    }

    #[tokio::test]
    async fn test_stats_handler_counts_loads() {
        let state = state_with(500, "");
        blog_handler(State(state.clone())).await;

        let response = stats_handler(State(state)).await;
        assert_eq!(response.network_fetches, 1);
        assert_eq!(response.failures, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_state_from_default_config() {
        let state = AppState::from_config(&Config::default()).unwrap();
        assert_eq!(state.profile_url, "https://fxrhanansari.medium.com/");
        assert_eq!(
            state.feed.endpoint().api_url,
            "https://api.rss2json.com/v1/api.json"
        );
    }
}
