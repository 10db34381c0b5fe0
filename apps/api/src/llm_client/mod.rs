//! Chat client: the single point of entry for every language-model call in Careerion.
//!
//! ARCHITECTURAL RULE: No other module may call the chat backend directly.
//! Replies come back as raw text; callers run them through `crate::interpret`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::interpret::{InterpretedReply, ReplyMode};
use crate::upstream::{UpstreamClient, UpstreamError};

pub mod prompts;

const CHAT_PATH: &str = "/chat";
const CAREER_QUERY_PATH: &str = "/career-recommendations";
const MAX_RETRIES: u32 = 3;

/// One prior turn in the backend's history format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: String,
    pub parts: Vec<HistoryPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPart {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryTurn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub expect_json: bool,
}

/// Authenticated query against the profile-aware recommendations endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CareerQuery {
    pub query: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    #[serde(default)]
    pub response: String,
    /// Pre-parsed payload, present when the backend honoured `expectJson` itself.
    #[serde(default)]
    pub json: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub model_used: Option<String>,
}

impl ChatReply {
    /// Interprets the reply. In JSON mode a backend-parsed payload wins over
    /// extraction from the response text.
    pub fn interpret(&self, mode: ReplyMode, max_chars: usize) -> InterpretedReply {
        match (&self.json, mode) {
            (Some(value), ReplyMode::Json) if !value.is_null() => {
                InterpretedReply::Structured(value.clone())
            }
            _ => InterpretedReply::from_text(&self.response, mode, max_chars),
        }
    }
}

/// The chat backend seam. `AppState` carries an `Arc<dyn ChatBackend>` so
/// handlers never depend on the HTTP implementation.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, UpstreamError>;

    async fn career_query(
        &self,
        query: &CareerQuery,
        token: &str,
    ) -> Result<ChatReply, UpstreamError>;
}

/// HTTP implementation of `ChatBackend` with retry on 429 / 5xx / transport errors.
#[derive(Clone)]
pub struct ChatClient {
    upstream: UpstreamClient,
}

impl ChatClient {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }

    async fn post_with_retry<B>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<ChatReply, UpstreamError>
    where
        B: Serialize + Sync,
    {
        let mut last_error: Option<UpstreamError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Chat call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            match self
                .upstream
                .post_json::<B, ChatReply>(path, body, bearer)
                .await
            {
                Ok(reply) => {
                    debug!(
                        path,
                        response_chars = reply.response.len(),
                        has_json = reply.json.is_some(),
                        model = reply.model_used.as_deref().unwrap_or("unknown"),
                        "Chat call succeeded"
                    );
                    return Ok(reply);
                }
                Err(e) if e.is_retryable() => {
                    warn!("Chat backend returned a retryable error: {e}");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(UpstreamError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl ChatBackend for ChatClient {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, UpstreamError> {
        self.post_with_retry(CHAT_PATH, request, None).await
    }

    async fn career_query(
        &self,
        query: &CareerQuery,
        token: &str,
    ) -> Result<ChatReply, UpstreamError> {
        self.post_with_retry(CAREER_QUERY_PATH, query, Some(token))
            .await
    }
}
