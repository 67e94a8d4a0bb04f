//! Validation of raw provider responses.

use crate::error::{Result, StoryError};
use crate::provider::{FinishReason, ProviderResponse};

/// Pulls the story out of a provider response.
///
/// Requires at least one candidate with non-blank text. Withheld output is
/// reported with a message per cause and the raw reason code attached.
pub fn extract_story(response: ProviderResponse) -> Result<String> {
    let Some(candidate) = response.candidates.first() else {
        return match response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason())
        {
            Some(reason) => Err(withheld(&reason)),
            None => Err(StoryError::generation(
                "Story provider returned no candidates",
            )),
        };
    };

    let text = candidate.text();
    let text = text.trim();
    if !text.is_empty() {
        return Ok(text.to_string());
    }

    match candidate.finish_reason() {
        Some(reason @ (FinishReason::Safety | FinishReason::Recitation | FinishReason::Other(_))) => {
            Err(withheld(&reason))
        }
        Some(reason) => Err(StoryError::generation_with_reason(
            "Empty content returned from story provider",
            reason.as_code(),
        )),
        None => Err(StoryError::generation(
            "Empty content returned from story provider",
        )),
    }
}

fn withheld(reason: &FinishReason) -> StoryError {
    let message = match reason {
        FinishReason::Safety => {
            "Story generation was blocked by safety filters. Try a different word.".to_string()
        }
        FinishReason::Recitation => {
            "Story generation was blocked due to recitation concerns. Try a different word."
                .to_string()
        }
        other => format!(
            "Story generation failed with finish reason: {}",
            other.as_code()
        ),
    };
    StoryError::generation_with_reason(message, reason.as_code())
}
