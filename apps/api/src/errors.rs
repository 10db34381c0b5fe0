use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interpret::extractor::ExtractionError;
use crate::session::SessionError;
use crate::upstream::UpstreamError;

/// Shown for every extraction or shape failure in the recommendations flow.
pub const RECOMMENDATIONS_UNAVAILABLE_MESSAGE: &str = "Sorry, we couldn't get recommendations. \
    The AI response might have been in an unexpected format. \
    Please try rephrasing your skills and interests.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Form validation failed on {} field(s)", .0.len())]
    FieldErrors(BTreeMap<String, String>),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Recommendations unavailable: {0}")]
    Recommendations(ExtractionError),

    #[error("Assistant returned an empty reply")]
    EmptyReply,

    #[error("Backend error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut fields = None;

        let (status, code, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            AppError::FieldErrors(errors) => {
                let message = format!("{} field(s) need attention", errors.len());
                fields = Some(errors);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    message,
                )
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Sign in to continue".to_string(),
            ),
            AppError::Recommendations(reason) => {
                // The precise reason only goes to the log; callers see one message.
                tracing::debug!("Recommendations unavailable: {reason}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "RECOMMENDATIONS_UNAVAILABLE",
                    RECOMMENDATIONS_UNAVAILABLE_MESSAGE.to_string(),
                )
            }
            AppError::EmptyReply => (
                StatusCode::BAD_GATEWAY,
                "EMPTY_REPLY",
                "Sorry, I encountered an issue. Please try again or rephrase your question."
                    .to_string(),
            ),
            AppError::Upstream(UpstreamError::Api { status, message })
                if (400..500).contains(&status) && status != 429 =>
            {
                // Backend rejections (bad credentials, missing profile) pass through.
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST);
                (status, "BACKEND_REJECTED", message)
            }
            AppError::Upstream(e) => {
                tracing::error!("Backend error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "BACKEND_ERROR",
                    "The Careerion backend is unavailable. Please try again.".to_string(),
                )
            }
            AppError::Session(e) => {
                tracing::error!("Session error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SESSION_ERROR",
                    "Could not update the session".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(fields) = fields {
            error["fields"] = json!(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
