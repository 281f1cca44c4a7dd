//! Error types for identity operations.

use thiserror::Error;

/// Errors that can occur while handling identity material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Key bytes were malformed.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Hex decoding failed.
    #[error("Hex encoding error: {0}")]
    Hex(String),

    /// The user's data container could not be resolved.
    #[error("Data container unavailable: {0}")]
    ContainerUnavailable(String),
}

/// Result type for identity operations.
pub type Result<T> = std::result::Result<T, IdentityError>;

impl From<hex::FromHexError> for IdentityError {
    fn from(err: hex::FromHexError) -> Self {
        Self::Hex(err.to_string())
    }
}
