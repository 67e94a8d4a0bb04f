//! Word Story - A small web service that turns vocabulary words into short stories
//!
//! Builds a length-tiered prompt, caches generated stories in memory and falls
//! back to deterministic mock stories when no provider credential is configured.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod provider;
pub mod story;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, StoryError};
pub use prompt::LengthTier;
pub use story::{Backend, StoryRequest, StoryService};
