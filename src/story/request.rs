//! Story request and input validation.

use crate::error::{Result, StoryError};
use crate::prompt::LengthTier;

/// Sampling temperature used when the caller does not pick one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Token budget used when the caller does not pick one.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Highest temperature the provider accepts.
const MAX_TEMPERATURE: f32 = 2.0;

// == Story Request ==
/// One story generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryRequest {
    /// Vocabulary word as supplied by the caller
    pub word: String,
    /// Requested story length
    pub tier: LengthTier,
    /// Sampling temperature
    pub temperature: f32,
    /// Requested token budget, capped later by the tier ceiling
    pub max_tokens: u32,
    /// Optional sense of the word to use
    pub context: Option<String>,
}

impl StoryRequest {
    /// Creates a request with default tier, temperature and token budget.
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tier: LengthTier::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            context: None,
        }
    }

    pub fn with_tier(mut self, tier: LengthTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Checks every field and returns the normalized word and context.
    pub(crate) fn validate(&self) -> Result<(String, Option<String>)> {
        let word = normalize_word(&self.word)?;

        if !self.temperature.is_finite() || !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(StoryError::InvalidInput(format!(
                "'temperature' must be between 0.0 and {}",
                MAX_TEMPERATURE
            )));
        }

        if self.max_tokens == 0 {
            return Err(StoryError::InvalidInput(
                "'max_tokens' must be at least 1".to_string(),
            ));
        }

        let context = self
            .context
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok((word, context))
    }
}

// == Word Normalization ==
/// Trims and lowercases a word, rejecting empty input and disallowed characters.
///
/// Letters, spaces, hyphens and apostrophes are allowed.
pub fn normalize_word(word: &str) -> Result<String> {
    let word = word.trim();
    if word.is_empty() {
        return Err(StoryError::InvalidInput(
            "'word' must be a non-empty string".to_string(),
        ));
    }

    let normalized = word.to_lowercase();
    if let Some(bad) = normalized.chars().find(|c| !is_allowed_char(*c)) {
        return Err(StoryError::InvalidInput(format!(
            "'word' contains a disallowed character: {:?}",
            bad
        )));
    }

    Ok(normalized)
}

fn is_allowed_char(c: char) -> bool {
    c.is_alphabetic() || c == ' ' || c == '-' || c == '\''
}
