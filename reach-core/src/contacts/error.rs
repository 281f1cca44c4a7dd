//! Error types for contact source access.
//!
//! The loader never surfaces these to its callers: any enumeration failure
//! is logged and treated as an empty address book.

use thiserror::Error;

/// Error type for address-book enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactsError {
    /// The user has not granted (or has revoked) contacts access.
    #[error("Contacts access denied")]
    AccessDenied,

    /// The platform contact store could not be queried.
    #[error("Contact store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for contact source operations.
pub type Result<T> = std::result::Result<T, ContactsError>;
