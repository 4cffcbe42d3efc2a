//! Cache Module
//!
//! Fetch-with-cache for the blog feed: a persisted batch with a freshness
//! window and stale fallback.

use std::time::Duration;

mod entry;
mod feed_cache;
mod stats;


// Re-export public types
pub use entry::CacheEntry;
pub use feed_cache::{FeedCache, LoadOutcome};
pub use stats::FeedStats;

// == Public Constants ==
/// Storage key holding the cached batch
pub const CACHE_KEY: &str = "medium_blog_posts";

/// How long a cached batch is served without revalidation
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(30 * 60);

/// Number of posts kept from each fetch
pub const MAX_ITEMS: usize = 4;
