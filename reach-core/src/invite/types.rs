//! Invite outcomes and collaborator seams.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::InviteResult;
use crate::remote::RemoteResult;

/// Answer of the quota service to a whitelist request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhitelistResult {
    /// The number was whitelisted and one invite consumed.
    Sent,
    /// The user has no invites left.
    QuotaExceeded,
}

/// Outcome of an invite attempt, as reported to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InviteOutcome {
    /// The invite was whitelisted and the message handed off.
    Sent,
    /// No invites left; nothing was sent.
    QuotaExceeded,
    /// The typed number is unusable; no remote call was made.
    InvalidPhone,
}

impl InviteOutcome {
    /// Returns whether the contact ended up invited.
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

impl From<WhitelistResult> for InviteOutcome {
    fn from(result: WhitelistResult) -> Self {
        match result {
            WhitelistResult::Sent => Self::Sent,
            WhitelistResult::QuotaExceeded => Self::QuotaExceeded,
        }
    }
}

/// Remote invite allowance.
#[async_trait]
pub trait InviteQuotaService: Send + Sync {
    /// Whitelists a canonical number, consuming one invite.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached.
    async fn whitelist(&self, canonical_phone: &str) -> RemoteResult<WhitelistResult>;

    /// Returns the number of invites the user has left.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached.
    async fn invite_count(&self) -> RemoteResult<u32>;
}

/// Platform hand-off of the invite message (e.g. an SMS intent).
pub trait MessageDispatcher: Send + Sync {
    /// Opens the platform's messaging flow for `phone` with `body`.
    ///
    /// # Errors
    ///
    /// Returns an error if no messaging flow could be started.
    fn send_message(&self, phone: &str, body: &str) -> InviteResult<()>;
}
