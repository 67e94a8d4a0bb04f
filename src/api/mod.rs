//! API Module
//!
//! HTTP handlers and routing for the story service REST API.
//!
//! # Endpoints
//! - `POST /generate_story` - Generate a story for a word
//! - `DELETE /cache` - Clear cached stories
//! - `GET /cache/stats` - Get cache statistics
//! - `GET /health` - Health check with mock mode and cache stats

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
