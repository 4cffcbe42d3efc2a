//! Response DTOs for the feed API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{FeedStats, LoadOutcome};
use crate::feed::FeedItem;

/// One post card as the UI renders it.
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub title: String,
    /// Raw publish timestamp from the feed
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    /// Publish date formatted for display, e.g. "January 15, 2024"
    pub date: String,
    pub link: String,
    pub thumbnail: String,
    /// Leading categories shown as tags
    pub categories: Vec<String>,
}

impl From<&FeedItem> for PostResponse {
    fn from(item: &FeedItem) -> Self {
        Self {
            title: item.title.clone(),
            pub_date: item.pub_date.clone(),
            date: item.display_date(),
            link: item.link.clone(),
            thumbnail: item.thumbnail.clone(),
            categories: item.preview_categories().to_vec(),
        }
    }
}

/// Response body for the blog panel (GET /api/blog)
#[derive(Debug, Clone, Serialize)]
pub struct BlogResponse {
    /// Posts to render, newest first
    pub posts: Vec<PostResponse>,
    /// True when nothing could be loaded
    pub degraded: bool,
    /// User-facing error text, only when `degraded`
    pub error: Option<String>,
    /// Blog home to link to when there are no posts
    pub profile_url: String,
}

impl BlogResponse {
    /// Creates a BlogResponse from a load outcome
    pub fn new(outcome: &LoadOutcome, profile_url: impl Into<String>) -> Self {
        Self {
            posts: outcome.items.iter().map(PostResponse::from).collect(),
            degraded: outcome.degraded,
            error: outcome.error_message(),
            profile_url: profile_url.into(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Loads answered from a fresh cache entry
    pub fresh_hits: u64,
    /// Outbound requests issued
    pub network_fetches: u64,
    /// Failed fetches answered from a stale entry
    pub stale_fallbacks: u64,
    /// Failed fetches with nothing cached
    pub failures: u64,
    /// fresh_hits / (fresh_hits + network_fetches)
    pub hit_rate: f64,
}

impl From<FeedStats> for StatsResponse {
    fn from(stats: FeedStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            fresh_hits: stats.fresh_hits,
            network_fetches: stats.network_fetches,
            stale_fallbacks: stats.stale_fallbacks,
            failures: stats.failures,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
