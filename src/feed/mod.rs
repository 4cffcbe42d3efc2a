//! Feed Module
//!
//! Wire types of the conversion API, the normalized post type, thumbnail
//! derivation and the outbound HTTP seam.

mod client;
mod item;
mod normalize;
mod wire;

// Re-export public types
pub use client::{FeedEndpoint, HttpClient, HttpResponse, ReqwestClient};
pub use item::{FeedItem, PREVIEW_CATEGORY_COUNT};
pub use normalize::{derive_thumbnail, first_image_src, normalize, normalize_batch};
pub use wire::{FeedResponse, RawFeedItem};
