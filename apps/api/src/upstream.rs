//! Upstream client: JSON over HTTP to the Careerion backend.
//!
//! Auth, profile storage and the chat backend all live behind one base URL.
//! Every collaborator client wraps an `UpstreamClient`; none of them build
//! `reqwest` requests on their own.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },
}

impl UpstreamError {
    /// Transport failures, 429 and 5xx are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            UpstreamError::Http(_) => true,
            UpstreamError::Api { status, .. } => *status == 429 || *status >= 500,
            UpstreamError::Decode(_) | UpstreamError::RateLimited { .. } => false,
        }
    }
}

/// Error body the backend returns on failure: `{ "error": "..." }`.
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<T, UpstreamError> {
        let body = self.send(self.client.get(self.url(path)), bearer).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T, UpstreamError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        let body = self.send(request, bearer).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POSTs and ignores whatever the backend sends back on success.
    pub async fn post_discard<B>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<(), UpstreamError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.client.post(self.url(path)).json(body);
        self.send(request, bearer).await.map(|_| ())
    }

    async fn send(
        &self,
        request: RequestBuilder,
        bearer: Option<&str>,
    ) -> Result<String, UpstreamError> {
        let request = match bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message: error_message(body),
            });
        }

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            "Upstream call succeeded"
        );
        Ok(body)
    }
}

/// Pulls the backend's `error` message out of a failure body, falling back to
/// the raw body text.
fn error_message(body: String) -> String {
    serde_json::from_str::<BackendErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client =
            UpstreamClient::new("http://localhost:5001/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("/chat"), "http://localhost:5001/api/chat");
        assert_eq!(
            client.url("user/profile"),
            "http://localhost:5001/api/user/profile"
        );
    }

    #[test]
    fn test_error_message_prefers_backend_error_field() {
        assert_eq!(
            error_message(r#"{"error":"Invalid credentials"}"#.to_string()),
            "Invalid credentials"
        );
        assert_eq!(error_message("Bad Gateway".to_string()), "Bad Gateway");
    }

    #[test]
    fn test_retryable_statuses() {
        let api = |status| UpstreamError::Api {
            status,
            message: String::new(),
        };
        assert!(api(429).is_retryable());
        assert!(api(503).is_retryable());
        assert!(!api(400).is_retryable());
        assert!(!api(401).is_retryable());
        assert!(!UpstreamError::RateLimited { retries: 3 }.is_retryable());
    }
}
