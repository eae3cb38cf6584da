//! Sign-up and sign-in requests
//!
//! The service only exchanges credentials for a token. Persisting the token
//! is left to the controller, which owns the session.

use common::models::{SignInForm, SignUpForm, TokenResponse, UserIdentity};
use tracing::{info, warn};

use crate::{
    api::{ApiClient, parse_body},
    error::{ClientError, ClientResult},
    session::decode_identity,
    validation::{validate_sign_in, validate_sign_up},
};

/// Token issued by an authentication endpoint, with the identity it carries
#[derive(Debug, Clone, PartialEq)]
pub struct SignedIn {
    pub token: String,
    pub user: UserIdentity,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Register a new account
    pub async fn sign_up(&self, form: &SignUpForm) -> ClientResult<SignedIn> {
        validate_sign_up(form).map_err(ClientError::Validation)?;
        info!("Sign-up attempt for user: {}", form.username);
        self.exchange("/auth/signup", form).await
    }

    /// Sign in to an existing account
    pub async fn sign_in(&self, form: &SignInForm) -> ClientResult<SignedIn> {
        validate_sign_in(form).map_err(ClientError::Validation)?;
        info!("Sign-in attempt for user: {}", form.username);
        self.exchange("/auth/signin", form).await
    }

    async fn exchange<B: serde::Serialize>(&self, path: &str, form: &B) -> ClientResult<SignedIn> {
        let response: TokenResponse = parse_body(self.api.post(path, form).await?)?;
        let user = decode_identity(&response.token).ok_or_else(|| {
            warn!("{} returned a token without a readable identity", path);
            ClientError::InvalidToken
        })?;

        Ok(SignedIn {
            token: response.token,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use common::{config::ClientConfig, storage::MemoryStorage};
    use std::sync::Arc;

    fn offline_service() -> AuthService {
        // Nothing listens on port 9 locally; a request would fail with Transport
        let config = ClientConfig::with_base_url("http://127.0.0.1:9");
        let session = SessionStore::new(Arc::new(MemoryStorage::new()));
        AuthService::new(ApiClient::new(&config, session))
    }

    #[tokio::test]
    async fn test_invalid_sign_up_never_reaches_the_network() {
        let form = SignUpForm {
            username: "ada".to_string(),
            password: "one".to_string(),
            password_conf: "two".to_string(),
        };
        let result = offline_service().sign_up(&form).await;
        assert!(matches!(result, Err(ClientError::Validation(m)) if m == "Passwords do not match"));
    }

    #[tokio::test]
    async fn test_invalid_sign_in_never_reaches_the_network() {
        let form = SignInForm {
            username: "ada".to_string(),
            password: String::new(),
        };
        let result = offline_service().sign_in(&form).await;
        assert!(matches!(result, Err(ClientError::Validation(_))));
    }
}
