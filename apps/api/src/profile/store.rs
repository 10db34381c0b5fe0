use async_trait::async_trait;

use crate::profile::models::{ProfileForm, StoredProfile};
use crate::upstream::{UpstreamClient, UpstreamError};

const PROFILE_PATH: &str = "/user/profile";

/// Remote profile storage, keyed by the signed-in user's token.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch(&self, token: &str) -> Result<StoredProfile, UpstreamError>;
    async fn save(&self, token: &str, profile: &ProfileForm) -> Result<(), UpstreamError>;
}

#[derive(Clone)]
pub struct HttpProfileStore {
    upstream: UpstreamClient,
}

impl HttpProfileStore {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn fetch(&self, token: &str) -> Result<StoredProfile, UpstreamError> {
        self.upstream.get_json(PROFILE_PATH, Some(token)).await
    }

    async fn save(&self, token: &str, profile: &ProfileForm) -> Result<(), UpstreamError> {
        self.upstream
            .post_discard(PROFILE_PATH, profile, Some(token))
            .await
    }
}
