//! Provider response payload
//!
//! Decoded leniently: every field is optional so that shape anomalies surface
//! as validation failures in the story service instead of decode errors.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Raw result of one generation call.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, deserialize_with = "reason_code")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Content {
    #[serde(default, deserialize_with = "null_as_default")]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default, deserialize_with = "reason_code")]
    pub block_reason: Option<String>,
}

impl ProviderResponse {
    /// A response with a single candidate holding `text`.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    parts: vec![Part {
                        text: Some(text.into()),
                    }],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
            prompt_feedback: None,
        }
    }

    /// A response whose only candidate was withheld with `reason`.
    pub fn withheld(reason: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: None,
                finish_reason: Some(reason.into()),
            }],
            prompt_feedback: None,
        }
    }
}

impl Candidate {
    /// Concatenated text of all parts.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect()
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason.as_deref().map(FinishReason::from_code)
    }
}

impl PromptFeedback {
    pub fn block_reason(&self) -> Option<FinishReason> {
        self.block_reason.as_deref().map(FinishReason::from_code)
    }
}

// == Finish Reason ==
/// Why the model stopped producing output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other(String),
}

impl FinishReason {
    /// Classifies a raw reason code. Numeric codes from older API versions are accepted.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "STOP" | "1" => FinishReason::Stop,
            "MAX_TOKENS" | "2" => FinishReason::MaxTokens,
            "SAFETY" | "3" => FinishReason::Safety,
            "RECITATION" | "4" => FinishReason::Recitation,
            _ => FinishReason::Other(code.to_string()),
        }
    }

    pub fn as_code(&self) -> &str {
        match self {
            FinishReason::Stop => "STOP",
            FinishReason::MaxTokens => "MAX_TOKENS",
            FinishReason::Safety => "SAFETY",
            FinishReason::Recitation => "RECITATION",
            FinishReason::Other(code) => code,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a reason given as a string or a number.
fn reason_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_gemini_success() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "Once upon "}, {"text": "a time."}], "role": "model"},
                "finishReason": "STOP",
                "index": 0
            }],
            "usageMetadata": {"promptTokenCount": 20}
        }"#;
        let response: ProviderResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.candidates.len(), 1);
        assert_eq!(response.candidates[0].text(), "Once upon a time.");
        assert_eq!(
            response.candidates[0].finish_reason(),
            Some(FinishReason::Stop)
        );
    }

    #[test]
    fn test_decode_prompt_block() {
        let json = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: ProviderResponse = serde_json::from_str(json).unwrap();

        assert!(response.candidates.is_empty());
        let feedback = response.prompt_feedback.unwrap();
        assert_eq!(feedback.block_reason(), Some(FinishReason::Safety));
    }

    #[test]
    fn test_decode_tolerates_nulls_and_missing_fields() {
        let json = r#"{"candidates": [{"content": {"parts": null}, "finishReason": null}, {}]}"#;
        let response: ProviderResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.candidates.len(), 2);
        assert_eq!(response.candidates[0].text(), "");
        assert_eq!(response.candidates[1].finish_reason(), None);

        let empty: ProviderResponse = serde_json::from_str(r#"{"candidates": null}"#).unwrap();
        assert!(empty.candidates.is_empty());
    }

    #[test]
    fn test_numeric_finish_reason() {
        let json = r#"{"candidates": [{"finishReason": 3}]}"#;
        let response: ProviderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.candidates[0].finish_reason.as_deref(), Some("3"));
        assert_eq!(
            response.candidates[0].finish_reason(),
            Some(FinishReason::Safety)
        );
    }

    #[test]
    fn test_finish_reason_codes() {
        assert_eq!(FinishReason::from_code("RECITATION"), FinishReason::Recitation);
        assert_eq!(FinishReason::from_code("max_tokens"), FinishReason::MaxTokens);
        assert_eq!(
            FinishReason::from_code("PROHIBITED_CONTENT"),
            FinishReason::Other("PROHIBITED_CONTENT".to_string())
        );
        assert_eq!(FinishReason::Other("SPII".to_string()).as_code(), "SPII");
    }

    #[test]
    fn test_constructors() {
        assert_eq!(ProviderResponse::from_text("hi").candidates[0].text(), "hi");
        let withheld = ProviderResponse::withheld("SAFETY");
        assert_eq!(withheld.candidates[0].text(), "");
        assert_eq!(
            withheld.candidates[0].finish_reason(),
            Some(FinishReason::Safety)
        );
    }
}
