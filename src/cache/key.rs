//! Cache Key Module
//!
//! Derives a stable cache key from the fields that shape a generated story.

use std::fmt;

use crate::prompt::LengthTier;

// == Cache Key ==
/// Identifies a cached story.
///
/// Temperature is stored by bit pattern so the key can implement `Eq` and `Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    word: String,
    tier: LengthTier,
    temperature_bits: u32,
    max_tokens: u32,
    context: Option<String>,
}

impl CacheKey {
    /// Builds a key from already-normalized inputs.
    ///
    /// # Arguments
    /// * `word` - Normalized (trimmed, lowercase) word
    /// * `tier` - Requested length tier
    /// * `temperature` - Sampling temperature
    /// * `max_tokens` - Effective token budget after the tier ceiling is applied
    /// * `context` - Optional meaning context
    pub fn new(
        word: &str,
        tier: LengthTier,
        temperature: f32,
        max_tokens: u32,
        context: Option<&str>,
    ) -> Self {
        // -0.0 and 0.0 compare equal but differ in bits
        let temperature = if temperature == 0.0 { 0.0 } else { temperature };

        Self {
            word: word.to_string(),
            tier,
            temperature_bits: temperature.to_bits(),
            max_tokens,
            context: context.map(str::to_string),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn tier(&self) -> LengthTier {
        self.tier
    }

    pub fn temperature(&self) -> f32 {
        f32::from_bits(self.temperature_bits)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.word,
            self.tier,
            self.temperature(),
            self.max_tokens
        )?;
        if let Some(context) = &self.context {
            write!(f, "_{}", context)?;
        }
        Ok(())
    }
}
