//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.rss2json.com/v1/api.json";
const DEFAULT_FEED_URL: &str = "https://medium.com/feed/@fxrhanansari";
const DEFAULT_PROFILE_URL: &str = "https://fxrhanansari.medium.com/";
const DEFAULT_CACHE_DIR: &str = ".cache/portfolio_feed";

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the RSS-to-JSON conversion API
    pub api_url: String,
    /// Source feed handed to the conversion API as `rss_url`
    pub feed_url: String,
    /// Canonical blog home, linked when no posts can be shown
    pub profile_url: String,
    /// How long a cached batch is served without revalidation, in seconds
    pub cache_duration: u64,
    /// Number of posts kept from each fetch
    pub max_posts: usize,
    /// Outbound request timeout in seconds
    pub fetch_timeout: u64,
    /// Directory backing the persistent cache
    pub cache_dir: PathBuf,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `RSS_API_URL` - Conversion API endpoint (default: rss2json)
    /// - `MEDIUM_RSS_URL` - Source feed URL
    /// - `MEDIUM_URL` - Blog home used as the manual fallback link
    /// - `CACHE_DURATION_SECS` - Freshness window in seconds (default: 1800)
    /// - `MAX_POSTS` - Posts kept per fetch (default: 4)
    /// - `FETCH_TIMEOUT_SECS` - Outbound timeout in seconds (default: 10)
    /// - `CACHE_DIR` - Persistent cache directory
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: non_empty_var("RSS_API_URL").unwrap_or(defaults.api_url),
            feed_url: non_empty_var("MEDIUM_RSS_URL").unwrap_or(defaults.feed_url),
            profile_url: non_empty_var("MEDIUM_URL").unwrap_or(defaults.profile_url),
            cache_duration: parsed_var("CACHE_DURATION_SECS").unwrap_or(defaults.cache_duration),
            max_posts: parsed_var("MAX_POSTS").unwrap_or(defaults.max_posts),
            fetch_timeout: parsed_var("FETCH_TIMEOUT_SECS").unwrap_or(defaults.fetch_timeout),
            cache_dir: non_empty_var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            server_port: parsed_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// Freshness window as a `Duration`.
    pub fn freshness_window(&self) -> Duration {
        Duration::from_secs(self.cache_duration)
    }

    /// Outbound timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            feed_url: DEFAULT_FEED_URL.to_string(),
            profile_url: DEFAULT_PROFILE_URL.to_string(),
            cache_duration: 30 * 60,
            max_posts: 4,
            fetch_timeout: 10,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            server_port: 3000,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
