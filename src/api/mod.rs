//! API Module
//!
//! HTTP handlers and routing for the feed service.
//!
//! # Endpoints
//! - `GET /api/blog` - Latest posts, cached with stale fallback
//! - `GET /stats` - Load statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
