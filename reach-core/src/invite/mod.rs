//! Invite sending and session tracking.
//!
//! Sending an invite is a whitelist call against the invite quota service
//! followed, on success, by handing a message to the platform (SMS intent)
//! and marking the contact invited locally. A quota refusal is an ordinary
//! outcome, not an error, and leaves the contact untouched.

mod error;
mod tracker;
mod types;

pub use error::{InviteError, InviteResult};
pub use tracker::{mark_invited, InviteTracker, SentInvite};
pub use types::{InviteOutcome, InviteQuotaService, MessageDispatcher, WhitelistResult};
