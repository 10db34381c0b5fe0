//! Axum route handlers for the Career API.

use axum::{extract::State, Json};

use crate::career::chat::{
    send_chat_turn, CareerCategory, ChatTurnRequest, ChatTurnResponse, QuickStart, CATEGORIES,
    QUICK_STARTS,
};
use crate::career::insights::{generate_insights, InsightsResponse};
use crate::career::recommendations::{
    request_recommendations, RecommendationOutcome, RecommendationRequest,
};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationOutcome>, AppError> {
    request.validate()?;
    let outcome = request_recommendations(
        state.chat.as_ref(),
        &request,
        state.config.max_extract_chars,
    )
    .await?;
    Ok(Json(outcome))
}

/// POST /api/v1/chat
///
/// Signed-in users are answered from their stored profile.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatTurnRequest>,
) -> Result<Json<ChatTurnResponse>, AppError> {
    let bearer = state.session.bearer().await;
    let response = send_chat_turn(
        state.chat.as_ref(),
        bearer.as_deref(),
        &request,
        state.config.max_extract_chars,
    )
    .await?;
    Ok(Json(response))
}

/// GET /api/v1/chat/categories
pub async fn handle_categories() -> Json<&'static [CareerCategory]> {
    Json(&CATEGORIES)
}

/// GET /api/v1/chat/quick-starts
pub async fn handle_quick_starts() -> Json<&'static [QuickStart]> {
    Json(&QUICK_STARTS)
}

/// GET /api/v1/insights
pub async fn handle_insights(
    State(state): State<AppState>,
) -> Result<Json<InsightsResponse>, AppError> {
    let token = state.session.bearer().await.ok_or(AppError::Unauthorized)?;
    Ok(Json(generate_insights(state.chat.as_ref(), &token).await))
}
