use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::errors::AppError;
use crate::session::auth::{AuthGrant, Credentials, GoogleSignIn, SignupRequest};
use crate::session::SessionView;
use crate::state::AppState;

async fn start_session(state: &AppState, grant: AuthGrant) -> Result<SessionView, AppError> {
    info!(email = %grant.user.email, "Signed in");
    Ok(state.session.login(grant.user, grant.token).await?)
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<SessionView>, AppError> {
    credentials.validate()?;
    let grant = state.auth.login(&credentials).await?;
    Ok(Json(start_session(&state, grant).await?))
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<SessionView>, AppError> {
    request.validate()?;
    let grant = state.auth.signup(&request).await?;
    Ok(Json(start_session(&state, grant).await?))
}

/// POST /api/v1/auth/google
pub async fn handle_google(
    State(state): State<AppState>,
    Json(request): Json<GoogleSignIn>,
) -> Result<Json<SessionView>, AppError> {
    if request.credential.trim().is_empty() {
        return Err(AppError::Validation(
            "credential cannot be empty".to_string(),
        ));
    }
    let grant = state.auth.google_sign_in(&request.credential).await?;
    Ok(Json(start_session(&state, grant).await?))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.session.logout().await?;
    info!("Signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.session.view().await)
}
