//! Axum route handlers exposing the interpretation pipeline over arbitrary text.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::interpret::formatter::{format_blocks, strip_inline_markup, DisplayBlock};
use crate::interpret::{InterpretedReply, ReplyMode};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub blocks: Vec<DisplayBlock>,
    pub plain: String,
}

#[derive(Debug, Deserialize)]
pub struct InterpretRequest {
    pub text: String,
    #[serde(default)]
    pub mode: ReplyMode,
}

#[derive(Debug, Serialize)]
pub struct InterpretResponse {
    pub reply: InterpretedReply,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<DisplayBlock>>,
}

/// POST /api/v1/format
pub async fn handle_format(Json(request): Json<FormatRequest>) -> Json<FormatResponse> {
    Json(FormatResponse {
        blocks: format_blocks(&request.text),
        plain: strip_inline_markup(&request.text),
    })
}

/// POST /api/v1/interpret
///
/// Always 200: an unparsable reply is a value here, not an error.
pub async fn handle_interpret(
    State(state): State<AppState>,
    Json(request): Json<InterpretRequest>,
) -> Json<InterpretResponse> {
    let reply =
        InterpretedReply::from_text(&request.text, request.mode, state.config.max_extract_chars);
    let blocks = match &reply {
        InterpretedReply::Prose(text) => Some(format_blocks(text)),
        _ => None,
    };
    Json(InterpretResponse { reply, blocks })
}
