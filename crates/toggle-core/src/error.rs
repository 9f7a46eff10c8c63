//! # Error Types
//!
//! Typed error handling for the toggle-checkout engine.
//! Fallible operations return `Result<T, ToggleError>`.
//!
//! The taxonomy is deliberately small. Rules that reference categories or
//! gateways that no longer exist are not errors at all: they are inert at
//! evaluation time. Malformed administrator input is repaired by defaulting
//! before it reaches a store, so it never surfaces here either.

use thiserror::Error;

/// Core error type for all toggle-checkout operations
#[derive(Debug, Error)]
pub enum ToggleError {
    /// Configuration errors (missing env vars, invalid config files)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Caller is not allowed to perform a settings update
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Admin request signature did not verify
    #[error("Signature verification failed: {0}")]
    SignatureVerificationFailed(String),

    /// Settings persistence failed (I/O on the backing blob)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToggleError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ToggleError::Configuration(_) => 500,
            ToggleError::InvalidRequest(_) => 400,
            ToggleError::Unauthorized(_) => 401,
            ToggleError::SignatureVerificationFailed(_) => 401,
            ToggleError::Storage(_) => 500,
            ToggleError::Serialization(_) => 500,
            ToggleError::Internal(_) => 500,
        }
    }

    /// Returns true if the request should be rejected outright with no
    /// partial effect (the settings-update failure mode)
    pub fn is_fatal_for_request(&self) -> bool {
        matches!(
            self,
            ToggleError::Unauthorized(_) | ToggleError::SignatureVerificationFailed(_)
        )
    }
}

/// Result type alias for toggle-checkout operations
pub type ToggleResult<T> = Result<T, ToggleError>;
