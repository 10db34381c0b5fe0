pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::career::handlers as career;
use crate::interpret::handlers as interpret;
use crate::profile::handlers as profile;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session
        .route("/api/v1/auth/login", post(session::handle_login))
        .route("/api/v1/auth/signup", post(session::handle_signup))
        .route("/api/v1/auth/google", post(session::handle_google))
        .route("/api/v1/auth/logout", post(session::handle_logout))
        .route("/api/v1/session", get(session::handle_get_session))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).post(profile::handle_save_profile),
        )
        .route(
            "/api/v1/profile/options",
            get(profile::handle_profile_options),
        )
        .route(
            "/api/v1/profile/validate/:step",
            post(profile::handle_validate_step),
        )
        // Career
        .route(
            "/api/v1/recommendations",
            post(career::handle_recommendations),
        )
        .route("/api/v1/chat", post(career::handle_chat))
        .route("/api/v1/chat/categories", get(career::handle_categories))
        .route(
            "/api/v1/chat/quick-starts",
            get(career::handle_quick_starts),
        )
        .route("/api/v1/insights", get(career::handle_insights))
        // Interpretation
        .route("/api/v1/format", post(interpret::handle_format))
        .route("/api/v1/interpret", post(interpret::handle_interpret))
        .with_state(state)
}
