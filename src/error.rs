//! # Error Types
//!
//! This module defines error types used throughout the estampa library.

use thiserror::Error;

/// Main error type for estampa operations
#[derive(Debug, Error)]
pub enum EstampaError {
    /// Out-of-range size, unknown enumeration value, unparseable integer
    /// or a missing required parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Payload that cannot be decoded (e.g. non-base64 image data)
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Transport-level errors (device open, TTY configuration)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Node stream deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EstampaError {
    /// Shorthand for an [`EstampaError::InvalidParameter`] naming the key and value.
    pub(crate) fn invalid(key: &str, value: &str) -> Self {
        Self::InvalidParameter(format!("invalid {}: '{}'", key, value))
    }
}
