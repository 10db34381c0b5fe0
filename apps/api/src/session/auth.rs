//! Auth backend: email/password and Google ID-token sign-in. The backend owns
//! the accounts; this side only exchanges credentials for `{ user, token }`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::session::User;
use crate::upstream::{UpstreamClient, UpstreamError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleSignIn {
    /// The ID token from Google Identity Services.
    pub credential: String,
}

#[derive(Debug, Serialize)]
struct GoogleTokenBody<'a> {
    token: &'a str,
}

/// What every sign-in path returns.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthGrant {
    pub user: User,
    pub token: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(AppError::Validation("password cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(AppError::Validation("password cannot be empty".to_string()));
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AppError::Validation(
            "email must be a valid address".to_string(),
        )),
    }
}

#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, UpstreamError>;
    async fn signup(&self, request: &SignupRequest) -> Result<AuthGrant, UpstreamError>;
    async fn google_sign_in(&self, id_token: &str) -> Result<AuthGrant, UpstreamError>;
}

#[derive(Clone)]
pub struct HttpAuthClient {
    upstream: UpstreamClient,
}

impl HttpAuthClient {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl AuthBackend for HttpAuthClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, UpstreamError> {
        self.upstream
            .post_json("/auth/login", credentials, None)
            .await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthGrant, UpstreamError> {
        self.upstream.post_json("/auth/signup", request, None).await
    }

    async fn google_sign_in(&self, id_token: &str) -> Result<AuthGrant, UpstreamError> {
        self.upstream
            .post_json("/auth/google", &GoogleTokenBody { token: id_token }, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_validation() {
        let ok = Credentials {
            email: "a@b.io".to_string(),
            password: "pw".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = Credentials {
            email: "not-an-email".to_string(),
            password: "pw".to_string(),
        };
        assert!(matches!(bad_email.validate(), Err(AppError::Validation(_))));

        let no_password = Credentials {
            email: "a@b.io".to_string(),
            password: String::new(),
        };
        assert!(matches!(no_password.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_signup_requires_name() {
        let request = SignupRequest {
            name: "  ".to_string(),
            email: "a@b.io".to_string(),
            password: "pw".to_string(),
        };
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_auth_grant_deserializes_backend_shape() {
        let grant: AuthGrant = serde_json::from_str(
            r#"{"user":{"_id":"42","name":"Kai","email":"kai@x.io"},"token":"jwt"}"#,
        )
        .unwrap();
        assert_eq!(grant.user.id, "42");
        assert_eq!(grant.token, "jwt");
    }
}
