//! Response DTOs for the story service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::prompt::LengthTier;

/// Response body for POST /generate_story
#[derive(Debug, Clone, Serialize)]
pub struct StoryResponse {
    /// The word as sent by the client
    pub word: String,
    /// The generated story
    pub story: String,
    /// The resolved length tier
    pub length: LengthTier,
    /// Whether the story came from mock mode
    pub mock: bool,
}

impl StoryResponse {
    pub fn new(word: impl Into<String>, story: String, length: LengthTier, mock: bool) -> Self {
        Self {
            word: word.into(),
            story,
            length,
            mock,
        }
    }
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    /// Human-readable summary
    pub message: String,
    /// Number of cached stories removed
    pub cleared: usize,
}

impl ClearCacheResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cache cleared. Removed {} cached stories.", cleared),
            cleared,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Whether stories come from the mock provider
    pub mock_mode: bool,
    pub cache_enabled: bool,
    pub cache_stats: CacheStats,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(mock_mode: bool, cache_stats: CacheStats) -> Self {
        Self {
            status: "healthy".to_string(),
            mock_mode,
            cache_enabled: true,
            cache_stats,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// Upstream reason code, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }
}
