//! Session-scoped record of sent invites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contacts::ContactRecord;

/// An invite sent during this session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentInvite {
    /// Number the invite went to.
    pub canonical_phone: String,
    /// When the invite was handed off.
    pub sent_at: DateTime<Utc>,
}

/// Marks the first contact with `canonical_phone` as invited.
///
/// Returns a new list; order and all other records are unchanged. A number
/// that is not in the list (e.g. a typed-in number) leaves it as is.
///
/// # Example
///
/// ```
/// use reach_core::contacts::ContactRecord;
/// use reach_core::invite::mark_invited;
///
/// let contacts = vec![ContactRecord::new("1", "Amy", "+15551234567")];
/// let updated = mark_invited(&contacts, "+15551234567");
/// assert!(updated[0].invited);
/// assert!(!contacts[0].invited);
/// ```
#[must_use]
pub fn mark_invited(contacts: &[ContactRecord], canonical_phone: &str) -> Vec<ContactRecord> {
    let mut updated = contacts.to_vec();
    if let Some(record) = updated
        .iter_mut()
        .find(|c| c.canonical_phone == canonical_phone)
    {
        record.invited = true;
    }
    updated
}

/// Ledger of invites sent during the session.
///
/// Remote status can lag behind a send that just happened; the ledger keeps
/// those contacts flagged as invited across later sync cycles.
#[derive(Debug, Clone, Default)]
pub struct InviteTracker {
    sent: Vec<SentInvite>,
}

impl InviteTracker {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an invite to `canonical_phone` sent now.
    pub fn record(&mut self, canonical_phone: &str) {
        self.record_at(canonical_phone, Utc::now());
    }

    /// Records an invite sent at the given time.
    ///
    /// Repeated invites to the same number keep the first timestamp.
    pub fn record_at(&mut self, canonical_phone: &str, sent_at: DateTime<Utc>) {
        if self.was_invited(canonical_phone) {
            return;
        }
        self.sent.push(SentInvite {
            canonical_phone: canonical_phone.to_string(),
            sent_at,
        });
    }

    /// Returns whether an invite to `canonical_phone` was recorded.
    #[must_use]
    pub fn was_invited(&self, canonical_phone: &str) -> bool {
        self.sent
            .iter()
            .any(|invite| invite.canonical_phone == canonical_phone)
    }

    /// Returns all recorded invites in send order.
    #[must_use]
    pub fn sent(&self) -> &[SentInvite] {
        &self.sent
    }

    /// Flags every contact in the ledger as invited.
    #[must_use]
    pub fn apply(&self, contacts: Vec<ContactRecord>) -> Vec<ContactRecord> {
        if self.sent.is_empty() {
            return contacts;
        }
        contacts
            .into_iter()
            .map(|mut record| {
                if self.was_invited(&record.canonical_phone) {
                    record.invited = true;
                }
                record
            })
            .collect()
    }
}
