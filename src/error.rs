//! Error types for the story service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;
use crate::provider::ProviderError;

// == Story Error Enum ==
/// Unified error type for story generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoryError {
    /// The request was rejected before any cache or provider access
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The provider failed or withheld its output
    #[error("{message}")]
    GenerationFailed {
        /// Human-readable cause
        message: String,
        /// Upstream reason code, when the provider gave one
        reason: Option<String>,
    },

    /// Anything not classified above
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoryError {
    /// Builds a `GenerationFailed` without an upstream reason code.
    pub fn generation(message: impl Into<String>) -> Self {
        StoryError::GenerationFailed {
            message: message.into(),
            reason: None,
        }
    }

    /// Builds a `GenerationFailed` carrying the raw upstream reason code.
    pub fn generation_with_reason(message: impl Into<String>, reason: impl Into<String>) -> Self {
        StoryError::GenerationFailed {
            message: message.into(),
            reason: Some(reason.into()),
        }
    }

    /// Returns the upstream reason code, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            StoryError::GenerationFailed { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }
}

// == Provider Error Conversion ==
impl From<ProviderError> for StoryError {
    fn from(err: ProviderError) -> Self {
        let reason = err.reason_code();
        StoryError::GenerationFailed {
            message: format!("Story provider request failed: {}", err),
            reason,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for StoryError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            StoryError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            StoryError::GenerationFailed { message, reason } => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::new(format!("I couldn't generate a story: {}", message))
                    .with_reason(reason),
            ),
            StoryError::Internal(detail) => {
                // Never expose the detail to the client
                error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the story service.
pub type Result<T> = std::result::Result<T, StoryError>;
