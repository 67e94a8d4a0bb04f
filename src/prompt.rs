//! Prompt Builder Module
//!
//! Maps a requested length tier to a prompt template and an output token ceiling.

use std::fmt;

use serde::{Deserialize, Serialize};

// == Length Tier ==
/// Requested story length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthTier {
    Brief,
    #[default]
    Short,
    Medium,
    Long,
}

impl LengthTier {
    /// All tiers, shortest first.
    pub const ALL: [LengthTier; 4] = [
        LengthTier::Brief,
        LengthTier::Short,
        LengthTier::Medium,
        LengthTier::Long,
    ];

    /// Parses a tier name, falling back to `Short` for anything unrecognized.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "brief" => LengthTier::Brief,
            "short" => LengthTier::Short,
            "medium" => LengthTier::Medium,
            "long" => LengthTier::Long,
            _ => LengthTier::Short,
        }
    }

    /// Lowercase tier name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthTier::Brief => "brief",
            LengthTier::Short => "short",
            LengthTier::Medium => "medium",
            LengthTier::Long => "long",
        }
    }

    /// Word range requested from the model.
    pub fn word_range(&self) -> &'static str {
        match self {
            LengthTier::Brief => "in just 1-2 paragraphs (100-150 words)",
            LengthTier::Short => "(200-300 words)",
            LengthTier::Medium => "(400-500 words)",
            LengthTier::Long => "(600-800 words)",
        }
    }

    /// Hard upper bound on output tokens for this tier.
    pub fn max_tokens_ceiling(&self) -> u32 {
        match self {
            LengthTier::Brief => 200,
            LengthTier::Short => 400,
            LengthTier::Medium => 650,
            LengthTier::Long => 1000,
        }
    }

    fn template(&self, word: &str) -> String {
        match self {
            LengthTier::Brief => format!(
                "Create a very short story about '{}' {}. Let the story show what the word \
                 means without defining it. Keep it educational and appropriate for children.",
                word,
                self.word_range()
            ),
            LengthTier::Short => format!(
                "Create a short story about '{}' {} that demonstrates its meaning without \
                 defining it outright. Keep it educational and appropriate for children.",
                word,
                self.word_range()
            ),
            LengthTier::Medium => format!(
                "Create a medium-length story about '{}' {} with rich details that clearly \
                 shows its meaning without defining it outright. Keep it educational and \
                 appropriate for children.",
                word,
                self.word_range()
            ),
            LengthTier::Long => format!(
                "Create a detailed, engaging story about '{}' {} with character development \
                 and a clear plot that demonstrates the word's meaning without defining it \
                 outright. Keep it educational and appropriate for children.",
                word,
                self.word_range()
            ),
        }
    }
}

impl fmt::Display for LengthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Prompt ==
/// A rendered prompt together with its tier's token ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Instruction sent to the model
    pub text: String,
    /// Upper bound on output tokens, independent of what the caller asked for
    pub max_tokens_ceiling: u32,
}

impl Prompt {
    /// Builds the prompt for a word and tier, optionally pinning the word's sense.
    pub fn build(word: &str, tier: LengthTier, context: Option<&str>) -> Self {
        let mut text = tier.template(word);
        if let Some(context) = context {
            text.push_str(&format!(
                " Use '{}' in the sense of: {}.",
                word,
                context.trim_end_matches('.')
            ));
        }

        Self {
            text,
            max_tokens_ceiling: tier.max_tokens_ceiling(),
        }
    }

    /// Token budget actually passed to the provider.
    pub fn effective_max_tokens(&self, requested: u32) -> u32 {
        requested.min(self.max_tokens_ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ceilings() {
        assert_eq!(LengthTier::Brief.max_tokens_ceiling(), 200);
        assert_eq!(LengthTier::Short.max_tokens_ceiling(), 400);
        assert_eq!(LengthTier::Medium.max_tokens_ceiling(), 650);
        assert_eq!(LengthTier::Long.max_tokens_ceiling(), 1000);
    }

    #[test]
    fn test_ceilings_increase_with_tier() {
        let ceilings: Vec<u32> = LengthTier::ALL
            .iter()
            .map(|t| t.max_tokens_ceiling())
            .collect();
        assert!(ceilings.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_parse_lenient_known_tiers() {
        assert_eq!(LengthTier::parse_lenient("brief"), LengthTier::Brief);
        assert_eq!(LengthTier::parse_lenient(" MEDIUM "), LengthTier::Medium);
        assert_eq!(LengthTier::parse_lenient("Long"), LengthTier::Long);
    }

    #[test]
    fn test_parse_lenient_falls_back_to_short() {
        assert_eq!(LengthTier::parse_lenient("invalid-tier"), LengthTier::Short);
        assert_eq!(LengthTier::parse_lenient(""), LengthTier::Short);
    }

    #[test]
    fn test_prompt_names_word_and_range() {
        for tier in LengthTier::ALL {
            let prompt = Prompt::build("adventure", tier, None);
            assert!(prompt.text.contains("'adventure'"));
            assert!(prompt.text.contains(tier.word_range()));
            assert!(prompt.text.contains("appropriate for children"));
            assert_eq!(prompt.max_tokens_ceiling, tier.max_tokens_ceiling());
        }
    }

    #[test]
    fn test_brief_prompt_text() {
        let prompt = Prompt::build("adventure", LengthTier::Brief, None);
        assert!(prompt
            .text
            .starts_with("Create a very short story about 'adventure' in just 1-2 paragraphs"));
    }

    #[test]
    fn test_context_is_appended() {
        let prompt = Prompt::build("bank", LengthTier::Short, Some("the side of a river."));
        assert!(prompt.text.ends_with("Use 'bank' in the sense of: the side of a river."));
    }

    #[test]
    fn test_effective_max_tokens_is_capped() {
        let prompt = Prompt::build("word", LengthTier::Brief, None);
        assert_eq!(prompt.effective_max_tokens(500), 200);
        assert_eq!(prompt.effective_max_tokens(150), 150);
    }

    #[test]
    fn test_tier_serde_lowercase() {
        let json = serde_json::to_string(&LengthTier::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
