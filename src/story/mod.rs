//! Story Module
//!
//! The generation orchestrator: validates requests, short-circuits in mock
//! mode, consults the cache and calls the provider on a miss.

mod extract;
mod request;
mod service;

pub use extract::extract_story;
pub use request::{normalize_word, StoryRequest, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use service::{Backend, StoryService};
