//! Structured extractor: recovers a JSON value from a noisy model reply.
//!
//! Models asked for "JSON only" still wrap the payload in code fences, lead with
//! pleasantries, or append commentary. The extractor peels fences, discards
//! everything before the first `[` / `{`, and falls back to progressive
//! right-truncation when the remainder does not parse as a whole.
//!
//! Known limitation: when the real payload is itself truncated mid-value, the
//! truncation loop may settle on a shorter prefix that happens to be valid JSON.
//! Nothing here can tell that prefix apart from the intended payload.
//!
//! `serde_json` stops at 128 levels of nesting. Deeper payloads, valid or not,
//! come back as `UnparsableJson`; the recursion limit stays on so a hostile
//! reply cannot exhaust the stack.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serializer;
use serde_json::Value;
use thiserror::Error;

/// Upper bound on the candidate length the truncation loop will walk.
pub const DEFAULT_MAX_CANDIDATE_CHARS: usize = 20_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("reply was empty")]
    Empty,

    #[error("no JSON object or array found in reply")]
    NoJsonFound,

    #[error("no prefix of the reply parsed as JSON")]
    UnparsableJson,

    #[error("JSON candidate of {len} chars exceeds the {limit} char recovery limit")]
    TooLarge { len: usize, limit: usize },

    #[error("unexpected JSON shape: {0}")]
    InvalidShape(String),
}

/// Serializes an extraction error as its display string.
pub fn serialize_reason<S: Serializer>(error: &ExtractionError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

/// A closed fence with an optional language tag; only the body survives.
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_+-]*(?P<body>.*?)```").expect("fence pattern is valid")
});

/// Removes triple-backtick fence markers (and their language tags), keeping
/// the fenced content and everything around it in place.
pub fn strip_code_fences(text: &str) -> Cow<'_, str> {
    FENCE.replace_all(text, "$body")
}

/// Extracts a JSON value using the default truncation cap.
pub fn extract_json(text: &str) -> Result<Value, ExtractionError> {
    extract_json_with_limit(text, DEFAULT_MAX_CANDIDATE_CHARS)
}

/// Extracts the first JSON array/object embedded in `text`.
///
/// Candidates longer than `max_chars` only get the full-parse attempt.
pub fn extract_json_with_limit(text: &str, max_chars: usize) -> Result<Value, ExtractionError> {
    if text.trim().is_empty() {
        return Err(ExtractionError::Empty);
    }

    let unfenced = strip_code_fences(text);
    let cleaned = unfenced.trim();

    let start = cleaned
        .find(['[', '{'])
        .ok_or(ExtractionError::NoJsonFound)?;
    let candidate = &cleaned[start..];

    if let Ok(value) = serde_json::from_str::<Value>(candidate) {
        return Ok(value);
    }

    let len = candidate.chars().count();
    if len > max_chars {
        return Err(ExtractionError::TooLarge {
            len,
            limit: max_chars,
        });
    }

    recover_prefix(candidate).ok_or(ExtractionError::UnparsableJson)
}

/// Walks prefixes from longest to shortest and returns the first that parses.
///
/// The candidate starts with `[` or `{`, so only prefixes whose last
/// non-whitespace char is `]` or `}` can ever parse; the rest are skipped.
fn recover_prefix(candidate: &str) -> Option<Value> {
    candidate
        .char_indices()
        .rev()
        .filter(|(_, c)| matches!(c, ']' | '}'))
        .find_map(|(i, c)| serde_json::from_str::<Value>(&candidate[..i + c.len_utf8()]).ok())
}
