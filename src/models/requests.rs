//! Request DTOs for the story service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::prompt::LengthTier;
use crate::story::StoryRequest;

/// Request body for POST /generate_story
///
/// # Fields
/// - `word`: The vocabulary word to build a story around
/// - `length`: Story length tier; unknown values fall back to "short"
/// - `temperature`, `max_tokens`, `context`: Optional generation settings
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateStoryRequest {
    pub word: String,
    #[serde(default)]
    pub length: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub context: Option<String>,
}

impl GenerateStoryRequest {
    /// Resolved length tier.
    pub fn tier(&self) -> LengthTier {
        self.length
            .as_deref()
            .map(LengthTier::parse_lenient)
            .unwrap_or_default()
    }

    /// Converts the body into a service request, filling in defaults.
    pub fn to_story_request(&self) -> StoryRequest {
        let mut request = StoryRequest::new(self.word.clone()).with_tier(self.tier());
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        if let Some(context) = &self.context {
            request = request.with_context(context.clone());
        }
        request
    }
}
