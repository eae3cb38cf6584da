//! Client configuration
//!
//! Values are layered: built-in defaults, then an optional `hoots.toml` in
//! the working directory, then `HOOTS_`-prefixed environment variables.

use std::path::PathBuf;

use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::ConfigResult;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Default location of the persisted session document
pub const DEFAULT_TOKEN_PATH: &str = ".hoots/session.json";

/// Configuration for the hoots client
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL every API path is appended to (e.g., "http://localhost:3000")
    pub base_url: String,
    /// File holding the persisted session token
    pub token_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig from `hoots.toml` and environment variables
    ///
    /// # Environment Variables
    /// - `HOOTS_BASE_URL`: API base URL (default: "http://localhost:3000")
    /// - `HOOTS_TOKEN_PATH`: session file path (default: ".hoots/session.json")
    pub fn from_env() -> ConfigResult<Self> {
        Self::load(Some("hoots"))
    }

    /// Load configuration, reading the named file (without extension) if present
    pub fn load(file: Option<&str>) -> ConfigResult<Self> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("token_path", DEFAULT_TOKEN_PATH)?;

        if let Some(name) = file {
            builder = builder.add_source(File::with_name(name).required(false));
        }

        let config = builder
            .add_source(Environment::with_prefix("HOOTS"))
            .build()?
            .try_deserialize::<ClientConfig>()?;

        Ok(config.normalized())
    }

    /// Build a config for an explicit base URL, keeping the default token path
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
        .normalized()
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_client_config_defaults() {
        let config = ClientConfig::load(None).unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.token_path, PathBuf::from(".hoots/session.json"));
    }

    #[test]
    #[serial]
    fn test_client_config_from_env_with_custom_values() {
        // Set environment variables for testing
        unsafe {
            std::env::set_var("HOOTS_BASE_URL", "https://api.example.com/");
            std::env::set_var("HOOTS_TOKEN_PATH", "/tmp/hoots-session.json");
        }

        let config = ClientConfig::load(None).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.token_path, PathBuf::from("/tmp/hoots-session.json"));

        // Clean up
        unsafe {
            std::env::remove_var("HOOTS_BASE_URL");
            std::env::remove_var("HOOTS_TOKEN_PATH");
        }
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:4000//");
        assert_eq!(config.base_url, "http://127.0.0.1:4000");
    }
}
