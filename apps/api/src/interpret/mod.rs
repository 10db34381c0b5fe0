// Response interpretation: every backend reply passes through here before the UI
// sees it. JSON-mode replies go through the extractor + normalizer, prose replies
// through the display formatter.

pub mod extractor;
pub mod formatter;
pub mod handlers;
pub mod normalize;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::interpret::extractor::{extract_json_with_limit, serialize_reason, ExtractionError};
use crate::interpret::normalize::{normalize_non_empty, CareerRecommendation};

/// What the caller asked the backend to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyMode {
    Json,
    #[default]
    Prose,
}

/// A backend reply after interpretation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InterpretedReply {
    Structured(Value),
    Prose(String),
    Unparsable(#[serde(serialize_with = "serialize_reason")] ExtractionError),
}

impl InterpretedReply {
    pub fn from_text(text: &str, mode: ReplyMode, max_chars: usize) -> Self {
        match mode {
            ReplyMode::Json => match extract_json_with_limit(text, max_chars) {
                Ok(value) => InterpretedReply::Structured(value),
                Err(e) => InterpretedReply::Unparsable(e),
            },
            ReplyMode::Prose if text.trim().is_empty() => {
                InterpretedReply::Unparsable(ExtractionError::Empty)
            }
            ReplyMode::Prose => InterpretedReply::Prose(text.to_string()),
        }
    }

    /// Normalizes a structured reply into recommendations.
    pub fn into_recommendations(self) -> Result<Vec<CareerRecommendation>, ExtractionError> {
        match self {
            InterpretedReply::Structured(value) => normalize_non_empty(&value),
            InterpretedReply::Prose(_) => Err(ExtractionError::InvalidShape(
                "expected structured JSON, got prose".to_string(),
            )),
            InterpretedReply::Unparsable(e) => Err(e),
        }
    }
}
