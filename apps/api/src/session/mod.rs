//! Session: who is signed in and with which token.
//!
//! One `SessionHandle` lives in `AppState`. It is created at startup from the
//! persisted state and changes only through `login` / `logout`.

pub mod auth;
pub mod handlers;
pub mod store;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::session::store::SessionStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session encode error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Session persist error: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub current_user: Option<User>,
    pub auth_token: Option<String>,
}

impl SessionState {
    pub fn login(&mut self, user: User, token: String) {
        self.current_user = Some(user);
        self.auth_token = Some(token);
    }

    pub fn logout(&mut self) {
        self.current_user = None;
        self.auth_token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some() && self.auth_token.is_some()
    }

    pub fn bearer(&self) -> Option<&str> {
        if self.current_user.is_none() {
            return None;
        }
        self.auth_token.as_deref()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            authenticated: self.is_authenticated(),
            user: self.current_user.clone(),
        }
    }
}

/// What the UI sees of the session. The token never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub authenticated: bool,
    pub user: Option<User>,
}

#[derive(Clone)]
pub struct SessionHandle {
    state: Arc<RwLock<SessionState>>,
    store: Arc<SessionStore>,
}

impl SessionHandle {
    /// Opens the session, restoring whatever the store persisted last.
    pub fn open(store: SessionStore) -> Self {
        let state = store.load();
        if let Some(user) = &state.current_user {
            info!(email = %user.email, "Restored persisted session");
        }
        Self {
            state: Arc::new(RwLock::new(state)),
            store: Arc::new(store),
        }
    }

    pub async fn view(&self) -> SessionView {
        self.state.read().await.view()
    }

    pub async fn bearer(&self) -> Option<String> {
        self.state.read().await.bearer().map(str::to_string)
    }

    /// Persists first; the in-memory session only changes once the write succeeded.
    pub async fn login(&self, user: User, token: String) -> Result<SessionView, SessionError> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        next.login(user, token);
        self.store.save(&next)?;
        *state = next;
        Ok(state.view())
    }

    /// Removes the persisted session before signing out in memory, so a failed
    /// removal cannot resurrect the session on the next start.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let mut state = self.state.write().await;
        self.store.clear()?;
        state.logout();
        Ok(())
    }
}
