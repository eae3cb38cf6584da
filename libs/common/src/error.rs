//! Custom error types for the common library
//!
//! This module defines the storage and configuration errors shared by the
//! client and the stub API.

use thiserror::Error;

/// Custom error type for durable token storage
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error occurred while reading or writing the backing file
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be encoded or decoded
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A writer panicked while holding the storage lock
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Configuration error
#[derive(Error, Debug)]
#[error("Configuration error: {0}")]
pub struct ConfigError(#[from] pub ::config::ConfigError);

/// Type alias for Result with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
