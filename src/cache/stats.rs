//! Cache Statistics Module
//!
//! Counts how each `load()` was satisfied.

use serde::Serialize;

// == Feed Stats ==
/// Tracks how loads were served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedStats {
    /// Loads answered from a fresh cache entry
    pub fresh_hits: u64,
    /// Outbound requests issued
    pub network_fetches: u64,
    /// Failed fetches answered from a stale entry
    pub stale_fallbacks: u64,
    /// Failed fetches with nothing cached
    pub failures: u64,
}

impl FeedStats {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Share of loads served without touching the network.
    ///
    /// Returns 0.0 if no loads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.fresh_hits + self.network_fetches;
        if total == 0 {
            0.0
        } else {
            self.fresh_hits as f64 / total as f64
        }
    }

    pub fn record_fresh_hit(&mut self) {
        self.fresh_hits += 1;
    }

    pub fn record_fetch(&mut self) {
        self.network_fetches += 1;
    }

    pub fn record_stale_fallback(&mut self) {
        self.stale_fallbacks += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }
}
