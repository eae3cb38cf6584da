//! Custom error types for the hoots client

use common::error::StorageError;
use thiserror::Error;

/// Custom error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a JSON body (connection error, non-JSON response)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The JSON body did not have the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered with an error payload
    #[error("Server error: {0}")]
    Server(String),

    /// An authentication response carried a token that does not decode
    #[error("Invalid session token")]
    InvalidToken,

    /// A form was rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// A comment was added while no hoot detail is loaded
    #[error("No hoot detail loaded")]
    NoDetail,

    /// The session token could not be persisted
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Type alias for client results
pub type ClientResult<T> = Result<T, ClientError>;
