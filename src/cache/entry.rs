//! Cache Entry Module
//!
//! The persisted batch of posts with the time it was fetched.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::feed::FeedItem;

// == Cache Entry ==
/// A normalized batch and its fetch timestamp.
///
/// Serialized as `{ "data": [...], "timestamp": <unix ms> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Posts in source order
    pub data: Vec<FeedItem>,
    /// When the batch was fetched (Unix milliseconds)
    pub timestamp: u64,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(data: Vec<FeedItem>, timestamp: u64) -> Self {
        Self { data, timestamp }
    }

    // == Age ==
    /// Milliseconds since the batch was fetched, as of `now_ms`.
    ///
    /// A timestamp in the future counts as age 0.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.timestamp)
    }

    // == Is Fresh ==
    /// Checks whether the batch can be served without revalidation.
    ///
    /// Boundary condition: an entry whose age equals the window is stale.
    pub fn is_fresh(&self, now_ms: u64, window: Duration) -> bool {
        u128::from(self.age_ms(now_ms)) < window.as_millis()
    }

    // == Encoding ==
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(text)?)
    }
}
