//! JWT service for issuing and validating session tokens
//!
//! Tokens are HS256-signed and carry the user identity under `payload`,
//! which is the layout the client decodes.

use anyhow::Result;
use common::models::{TokenClaims, UserIdentity};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::{SystemTime, UNIX_EPOCH};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret for signing and verifying tokens
    pub secret: String,
    /// Token expiration time in seconds (default: 1 hour)
    pub token_expiry: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "stub-api-secret".to_string(),
            token_expiry: 3600,
        }
    }
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `STUB_API_JWT_SECRET`: signing secret (default: "stub-api-secret")
    /// - `STUB_API_TOKEN_EXPIRY`: token expiry in seconds (default: 3600)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let secret = std::env::var("STUB_API_JWT_SECRET").unwrap_or(defaults.secret);

        let token_expiry = std::env::var("STUB_API_TOKEN_EXPIRY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.token_expiry);

        JwtConfig {
            secret,
            token_expiry,
        }
    }
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Generate a session token for a user
    pub fn generate_token(&self, user: &UserIdentity) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = TokenClaims {
            payload: user.clone(),
            iat: Some(now),
            exp: Some(now + self.config.token_expiry),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<TokenClaims> {
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}
