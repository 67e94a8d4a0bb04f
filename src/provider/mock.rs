//! Mock provider used when no credential is configured.

/// Placeholder story. `{word}` is replaced with the normalized word.
pub const MOCK_STORY_TEMPLATE: &str = "This is a mock story for the word '{word}'. The story \
generation is currently running in mock mode because the GOOGLE_API_KEY is not configured. \
Please set the API key in your .env file to get real stories.";

/// Renders deterministic placeholder stories without any network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    /// Placeholder story for an already-normalized word.
    pub fn story_for(&self, word: &str) -> String {
        MOCK_STORY_TEMPLATE.replace("{word}", word)
    }
}
