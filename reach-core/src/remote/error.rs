//! Error types for remote identity service calls.

use thiserror::Error;

/// Errors that can occur while talking to the identity service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Uploading the contact set failed.
    #[error("Failed to upload contacts: {0}")]
    Upload(String),

    /// Fetching contact status failed.
    #[error("Failed to fetch contact status: {0}")]
    Fetch(String),

    /// The caller's data container could not be resolved.
    #[error("Data container unavailable: {0}")]
    ContainerUnavailable(String),

    /// The transport gave up waiting.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// The service answered with something we could not decode.
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The service rejected the request.
    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

impl From<crate::identity::IdentityError> for RemoteError {
    fn from(err: crate::identity::IdentityError) -> Self {
        Self::ContainerUnavailable(err.to_string())
    }
}
