//! Session management backed by durable token storage
//!
//! The session is the persisted bearer token plus the identity decoded from
//! it. Decoding is a local transformation: no network call, no signature
//! check and no expiry check. The decoded identity is an advisory hint for
//! the UI; the server enforces every authorization decision.

use std::sync::Arc;

use common::{
    error::StorageResult,
    models::{TokenClaims, UserIdentity},
    storage::{TOKEN_KEY, TokenStorage},
};
use jsonwebtoken::{DecodingKey, Validation, decode, decode_header};
use tracing::{info, warn};

/// Snapshot of the current session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: Option<UserIdentity>,
}

/// Session store for reading and replacing the persisted token
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
}

impl SessionStore {
    /// Create a new session store over the given storage
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    /// Get the persisted token, if any
    ///
    /// Storage failures are logged and read as "no token".
    pub fn get_token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to read session token: {}", e);
                None
            }
        }
    }

    /// Get the identity decoded from the persisted token
    pub fn get_user(&self) -> Option<UserIdentity> {
        self.get_token().and_then(|token| decode_identity(&token))
    }

    /// Persist a new token; later reads reflect it immediately
    pub fn set_token(&self, token: &str) -> StorageResult<()> {
        self.storage.set(TOKEN_KEY, token)?;
        info!("Session token stored");
        Ok(())
    }

    /// Remove the persisted token
    pub fn clear(&self) -> StorageResult<()> {
        self.storage.remove(TOKEN_KEY)?;
        info!("Session token cleared");
        Ok(())
    }

    /// Current session, or `None` when anonymous
    pub fn session(&self) -> Option<Session> {
        self.get_token().map(|token| {
            let user = decode_identity(&token);
            Session { token, user }
        })
    }
}

/// Decode the identity carried in a token's payload without verifying it
///
/// Returns `None` for anything that is not a three-part token whose payload
/// holds a `payload` identity object.
pub fn decode_identity(token: &str) -> Option<UserIdentity> {
    let header = match decode_header(token) {
        Ok(header) => header,
        Err(e) => {
            warn!("Ignoring malformed session token: {}", e);
            return None;
        }
    };

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => Some(data.claims.payload),
        Err(e) => {
            warn!("Ignoring session token with unreadable payload: {}", e);
            None
        }
    }
}
