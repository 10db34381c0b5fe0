//! In-memory backends for handler and router tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use crate::config::Config;
use crate::interpret::extractor::DEFAULT_MAX_CANDIDATE_CHARS;
use crate::llm_client::{CareerQuery, ChatBackend, ChatReply, ChatRequest};
use crate::profile::models::{ProfileForm, StoredProfile};
use crate::profile::store::ProfileStore;
use crate::session::auth::{AuthBackend, AuthGrant, Credentials, SignupRequest};
use crate::session::store::SessionStore;
use crate::session::{SessionHandle, User};
use crate::state::AppState;
use crate::upstream::UpstreamError;

/// Chat backend that answers every call with the same reply (or error status)
/// and remembers what it was sent.
#[derive(Default)]
pub struct StubChat {
    reply: ChatReply,
    failure: Option<u16>,
    last_request: Mutex<Option<ChatRequest>>,
    last_query: Mutex<Option<(CareerQuery, String)>>,
}

impl StubChat {
    pub fn replying(reply: ChatReply) -> Self {
        Self {
            reply,
            ..Default::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            failure: Some(status),
            ..Default::default()
        }
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Option<(CareerQuery, String)> {
        self.last_query.lock().unwrap().clone()
    }

    fn answer(&self) -> Result<ChatReply, UpstreamError> {
        match self.failure {
            Some(status) => Err(UpstreamError::Api {
                status,
                message: "stubbed failure".to_string(),
            }),
            None => Ok(self.reply.clone()),
        }
    }
}

#[async_trait]
impl ChatBackend for StubChat {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, UpstreamError> {
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.answer()
    }

    async fn career_query(
        &self,
        query: &CareerQuery,
        token: &str,
    ) -> Result<ChatReply, UpstreamError> {
        *self.last_query.lock().unwrap() = Some((query.clone(), token.to_string()));
        self.answer()
    }
}

/// Accepts any credentials and issues a token derived from the email.
pub struct StubAuth;

fn grant(name: &str, email: &str) -> AuthGrant {
    AuthGrant {
        user: User {
            id: format!("id-{email}"),
            name: name.to_string(),
            email: email.to_string(),
            picture: None,
        },
        token: format!("token-{email}"),
    }
}

#[async_trait]
impl AuthBackend for StubAuth {
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, UpstreamError> {
        Ok(grant("Test User", &credentials.email))
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthGrant, UpstreamError> {
        Ok(grant(&request.name, &request.email))
    }

    async fn google_sign_in(&self, _id_token: &str) -> Result<AuthGrant, UpstreamError> {
        Ok(grant("Google User", "google@example.com"))
    }
}

#[derive(Default)]
pub struct StubProfiles {
    saved: Mutex<Option<ProfileForm>>,
}

#[async_trait]
impl ProfileStore for StubProfiles {
    async fn fetch(&self, _token: &str) -> Result<StoredProfile, UpstreamError> {
        let profile = self.saved.lock().unwrap().clone();
        Ok(StoredProfile {
            profile_complete: profile.is_some(),
            profile,
        })
    }

    async fn save(&self, _token: &str, profile: &ProfileForm) -> Result<(), UpstreamError> {
        *self.saved.lock().unwrap() = Some(profile.clone());
        Ok(())
    }
}

/// State over stub backends with the session file in a fresh temp dir.
/// Keep the returned `TempDir` alive for the duration of the test.
pub fn test_state(chat: StubChat) -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");

    let config = Config {
        backend_url: "http://backend.test/api".to_string(),
        backend_timeout_secs: 5,
        port: 0,
        rust_log: "debug".to_string(),
        session_file: session_file.clone(),
        max_extract_chars: DEFAULT_MAX_CANDIDATE_CHARS,
    };

    let state = AppState {
        config,
        chat: Arc::new(chat),
        auth: Arc::new(StubAuth),
        profiles: Arc::new(StubProfiles::default()),
        session: SessionHandle::open(SessionStore::new(session_file)),
    };
    (state, dir)
}

pub async fn signed_in_state(chat: StubChat) -> (AppState, TempDir) {
    let (state, dir) = test_state(chat);
    let grant = grant("Asha", "asha@example.com");
    state.session.login(grant.user, grant.token).await.unwrap();
    (state, dir)
}
