//! Axum route handlers for the Profile API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::profile::models::{profile_options, ProfileForm, ProfileOptions, StoredProfile};
use crate::profile::validation::{validate_all, validate_step, FieldErrors, ProfileStep};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StepValidationResponse {
    pub step: ProfileStep,
    pub label: &'static str,
    pub valid: bool,
    pub errors: FieldErrors,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<StoredProfile>, AppError> {
    let token = state.session.bearer().await.ok_or(AppError::Unauthorized)?;
    let stored = state.profiles.fetch(&token).await?;
    Ok(Json(stored))
}

/// POST /api/v1/profile
///
/// Validates every step before anything is sent to the backend.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<StoredProfile>, AppError> {
    let token = state.session.bearer().await.ok_or(AppError::Unauthorized)?;

    let errors = validate_all(&form);
    if !errors.is_empty() {
        return Err(AppError::FieldErrors(errors));
    }

    state.profiles.save(&token, &form).await?;
    info!("Profile saved");

    Ok(Json(StoredProfile {
        profile: Some(form),
        profile_complete: true,
    }))
}

/// POST /api/v1/profile/validate/:step
pub async fn handle_validate_step(
    Path(step): Path<usize>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<StepValidationResponse>, AppError> {
    let step = ProfileStep::from_index(step)
        .ok_or_else(|| AppError::Validation(format!("unknown form step {step}")))?;
    let errors = validate_step(&form, step);

    Ok(Json(StepValidationResponse {
        step,
        label: step.label(),
        valid: errors.is_empty(),
        errors,
    }))
}

/// GET /api/v1/profile/options
pub async fn handle_profile_options() -> Json<ProfileOptions> {
    Json(profile_options())
}
