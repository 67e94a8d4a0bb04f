//! Provider Module
//!
//! The boundary to the hosted text model.
//!
//! # Providers
//! - `GeminiClient` - Google Gemini REST API
//! - `MockProvider` - Deterministic placeholder stories, used without credentials

mod error;
mod gemini;
mod mock;
mod response;

pub use error::ProviderError;
pub use gemini::GeminiClient;
pub use mock::{MockProvider, MOCK_STORY_TEMPLATE};
pub use response::{Candidate, Content, FinishReason, Part, PromptFeedback, ProviderResponse};

use async_trait::async_trait;

// == Generation Params ==
/// Everything the provider needs for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Fully rendered prompt
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token budget, already capped by the tier ceiling
    pub max_output_tokens: u32,
}

// == Story Provider Trait ==
/// A hosted model that turns a prompt into candidate texts.
///
/// Implementations make exactly one upstream attempt per call; retries are
/// left to the caller.
#[async_trait]
pub trait StoryProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Sends one generation request and returns the raw response.
    async fn generate(
        &self,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;
}
