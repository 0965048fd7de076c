//! Relay error types

use thiserror::Error;

/// Errors that can occur while relaying a turn
#[derive(Error, Debug)]
pub enum RelayError {
    /// Token endpoint returned a failure or an unusable body
    #[error("Token fetch failed: {0}")]
    TokenFetch(String),

    /// Remote messaging service answered with a non-success status
    #[error("Remote service error ({status}): {body}")]
    RemoteStatus {
        /// HTTP status code returned by the remote service
        status: u16,
        /// Response body, quoted for diagnosis
        body: String,
    },

    /// Transport-level HTTP failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session store failure
    #[error("Session store error: {0}")]
    Store(String),

    /// Reply could not be delivered to the calling channel
    #[error("Reply delivery failed: {0}")]
    Delivery(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl RelayError {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        RelayError::Other(msg.into())
    }

    /// Create a session store error
    pub fn store(msg: impl Into<String>) -> Self {
        RelayError::Store(msg.into())
    }

    /// Create a delivery error
    pub fn delivery(msg: impl Into<String>) -> Self {
        RelayError::Delivery(msg.into())
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
