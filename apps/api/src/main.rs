mod career;
mod config;
mod errors;
mod interpret;
mod llm_client;
mod profile;
mod routes;
mod session;
mod state;
mod upstream;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::ChatClient;
use crate::profile::store::HttpProfileStore;
use crate::routes::build_router;
use crate::session::auth::HttpAuthClient;
use crate::session::store::SessionStore;
use crate::session::SessionHandle;
use crate::state::AppState;
use crate::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Careerion API v{}", env!("CARGO_PKG_VERSION"));

    // One HTTP client shared by every backend collaborator
    let upstream = UpstreamClient::new(
        &config.backend_url,
        Duration::from_secs(config.backend_timeout_secs),
    )?;
    info!("Backend client initialized ({})", config.backend_url);

    let session = SessionHandle::open(SessionStore::new(config.session_file.clone()));
    info!("Session file: {}", config.session_file.display());

    let state = AppState {
        chat: Arc::new(ChatClient::new(upstream.clone())),
        auth: Arc::new(HttpAuthClient::new(upstream.clone())),
        profiles: Arc::new(HttpProfileStore::new(upstream)),
        session,
        config: config.clone(),
    };

    // Build router
    // TODO: restrict CORS origins once the web client's host is fixed
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
