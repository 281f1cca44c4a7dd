//! Error types for invite operations.

use thiserror::Error;

use crate::remote::RemoteError;

/// Errors that can occur while sending an invite.
#[derive(Debug, Error)]
pub enum InviteError {
    /// The quota service could not be reached.
    #[error("Invite service error: {0}")]
    Remote(#[from] RemoteError),

    /// The platform could not hand off the invite message.
    #[error("Failed to dispatch invite message: {0}")]
    Dispatch(String),
}

/// Result type for invite operations.
pub type InviteResult<T> = Result<T, InviteError>;
