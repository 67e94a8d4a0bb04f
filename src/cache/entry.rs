//! Cache Entry Module
//!
//! Defines the structure for individual cached stories.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cached story with its insertion time.
///
/// Entries are replaced wholesale on overwrite, never edited.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The generated story
    pub story: String,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(story: String) -> Self {
        Self {
            story,
            inserted_at: current_timestamp_ms(),
        }
    }

    // == Age ==
    /// Milliseconds since the entry was inserted.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.inserted_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as 0.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
