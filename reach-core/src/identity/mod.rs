//! Session identity for remote contact matching.
//!
//! The remote identity service scopes every upload and status query to the
//! caller's key and data container. This module holds that key material and
//! the [`IdentityProvider`] seam through which the host application hands it
//! to the sync pipeline.
//!
//! # Security
//!
//! - Secret bytes are zeroized on drop
//! - Debug output shows only a fingerprint of the public key
//! - Key comparison is constant-time

mod error;
mod key;

pub use error::{IdentityError, Result};
pub use key::{ContainerId, IdentityKey};

use async_trait::async_trait;

/// Source of the session's identity.
///
/// Passed explicitly to the sync pipeline instead of being looked up from
/// global state. When [`current_key`](Self::current_key) returns `None`
/// (no account yet, or logged out) the sync pipeline does not run.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the session key, if one is available.
    fn current_key(&self) -> Option<IdentityKey>;

    /// Resolves the user's remote data container.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be resolved.
    async fn container_id(&self, key: &IdentityKey) -> Result<ContainerId>;
}
