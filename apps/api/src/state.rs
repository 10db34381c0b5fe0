use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatBackend;
use crate::profile::store::ProfileStore;
use crate::session::auth::AuthBackend;
use crate::session::SessionHandle;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Chat backend. Default: `ChatClient` over HTTP.
    pub chat: Arc<dyn ChatBackend>,
    pub auth: Arc<dyn AuthBackend>,
    pub profiles: Arc<dyn ProfileStore>,
    /// The single signed-in session, persisted to `config.session_file`.
    pub session: SessionHandle,
}
