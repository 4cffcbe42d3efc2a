//! Portfolio Feed - blog panel data for a portfolio site
//!
//! Fetches a Medium feed through an RSS-to-JSON conversion API, derives
//! missing thumbnails, and caches the latest posts with a freshness window
//! and stale fallback.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod storage;

pub use api::AppState;
pub use cache::{FeedCache, LoadOutcome};
pub use config::Config;
pub use error::FeedError;
