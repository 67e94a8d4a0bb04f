//! Provider error types

use std::time::Duration;

use thiserror::Error;

/// Failures at the provider boundary.
///
/// These never reach callers directly; the story service wraps them as
/// `StoryError::GenerationFailed`.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("request timed out")]
    Timeout,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("could not decode provider response: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Short machine-readable code attached to `GenerationFailed`.
    pub fn reason_code(&self) -> Option<String> {
        match self {
            ProviderError::Api { status, .. } => Some(format!("HTTP_{}", status)),
            ProviderError::RateLimited { .. } => Some("RATE_LIMITED".to_string()),
            ProviderError::Authentication(_) => Some("AUTHENTICATION".to_string()),
            ProviderError::Timeout => Some("TIMEOUT".to_string()),
            ProviderError::Http(_) | ProviderError::Decode(_) | ProviderError::Configuration(_) => {
                None
            }
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Http(err.to_string())
        }
    }
}
