//! The state snapshot published to the UI.

use serde::{Deserialize, Serialize};

use crate::contacts::{filter_contacts, ContactRecord};
use crate::invite::mark_invited;

/// Snapshot of the invite screen's data.
///
/// Snapshots are values: every update builds a new one from the previous
/// one and publishes it whole. `filtered_contacts` is always the result of
/// filtering `all_contacts` by `filter_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    /// Contacts permission: unknown (`None`), granted or denied.
    pub permission_granted: Option<bool>,
    /// Whether the permission prompt has been shown.
    pub permission_requested: bool,
    /// Invites the user has left.
    pub invite_count: u32,
    /// All contacts in display order.
    pub all_contacts: Vec<ContactRecord>,
    /// Contacts matching `filter_text`, in display order.
    pub filtered_contacts: Vec<ContactRecord>,
    /// Current search text.
    pub filter_text: String,
    /// Whether a sync cycle is still running.
    pub loading: bool,
}

impl Default for SyncState {
    fn default() -> Self {
        Self {
            permission_granted: None,
            permission_requested: false,
            invite_count: 0,
            all_contacts: Vec::new(),
            filtered_contacts: Vec::new(),
            filter_text: String::new(),
            loading: true,
        }
    }
}

impl SyncState {
    /// Replaces the contact list and finishes loading.
    #[must_use]
    pub fn with_contacts(self, contacts: Vec<ContactRecord>) -> Self {
        Self {
            filtered_contacts: filter_contacts(&contacts, &self.filter_text),
            all_contacts: contacts,
            loading: false,
            ..self
        }
    }

    /// Applies new search text.
    #[must_use]
    pub fn with_filter(self, filter_text: &str) -> Self {
        Self {
            filtered_contacts: filter_contacts(&self.all_contacts, filter_text),
            filter_text: filter_text.to_string(),
            ..self
        }
    }

    /// Flags the contact with `canonical_phone` as invited.
    #[must_use]
    pub fn with_invited(self, canonical_phone: &str) -> Self {
        let all_contacts = mark_invited(&self.all_contacts, canonical_phone);
        Self {
            filtered_contacts: filter_contacts(&all_contacts, &self.filter_text),
            all_contacts,
            ..self
        }
    }

    /// Marks a sync cycle as running.
    #[must_use]
    pub fn with_loading(self) -> Self {
        Self {
            loading: true,
            ..self
        }
    }

    /// Records the permission answer.
    ///
    /// Loading is left alone; a cycle sets it once it actually starts.
    #[must_use]
    pub fn with_permission(self, granted: bool) -> Self {
        Self {
            permission_granted: Some(granted),
            ..self
        }
    }

    /// Records that the permission prompt was shown.
    #[must_use]
    pub fn with_permission_requested(self) -> Self {
        Self {
            permission_requested: true,
            ..self
        }
    }

    /// Records the remaining invite allowance.
    #[must_use]
    pub fn with_invite_count(self, invite_count: u32) -> Self {
        Self {
            invite_count,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contacts() -> Vec<ContactRecord> {
        vec![
            ContactRecord::new("1", "Alice Smith", "+15551234567"),
            ContactRecord::new("2", "Bob Lee", "+15559876543"),
        ]
    }

    #[test]
    fn default_is_loading_and_empty() {
        let state = SyncState::default();
        assert!(state.loading);
        assert_eq!(state.permission_granted, None);
        assert!(state.all_contacts.is_empty());
        assert!(state.filtered_contacts.is_empty());
    }

    #[test]
    fn with_contacts_finishes_loading() {
        let state = SyncState::default().with_contacts(contacts());
        assert!(!state.loading);
        assert_eq!(state.all_contacts.len(), 2);
        assert_eq!(state.filtered_contacts, state.all_contacts);
    }

    #[test]
    fn with_contacts_respects_current_filter() {
        let state = SyncState::default()
            .with_filter("lee")
            .with_contacts(contacts());
        assert_eq!(state.filtered_contacts.len(), 1);
        assert_eq!(state.filtered_contacts[0].name, "Bob Lee");
    }

    #[test]
    fn clearing_filter_restores_all() {
        let state = SyncState::default()
            .with_contacts(contacts())
            .with_filter("alice")
            .with_filter("");
        assert_eq!(state.filtered_contacts, state.all_contacts);
        assert_eq!(state.filter_text, "");
    }

    #[test]
    fn with_invited_updates_both_lists() {
        let state = SyncState::default()
            .with_contacts(contacts())
            .with_filter("bob")
            .with_invited("+15559876543");
        assert!(state.all_contacts[1].invited);
        assert!(state.filtered_contacts[0].invited);
    }

    #[test]
    fn permission_answer_does_not_touch_loading() {
        let loaded = SyncState::default().with_contacts(contacts());
        assert!(!loaded.clone().with_permission(false).loading);
        assert!(!loaded.clone().with_permission(true).loading);
        assert!(SyncState::default().with_permission(true).loading);
    }

    #[test]
    fn with_loading_keeps_contacts() {
        let state = SyncState::default()
            .with_contacts(contacts())
            .with_filter("bob")
            .with_loading();
        assert!(state.loading);
        assert_eq!(state.all_contacts.len(), 2);
        assert_eq!(state.filtered_contacts.len(), 1);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(SyncState::default().with_invite_count(3)).unwrap();
        assert_eq!(json["inviteCount"], 3);
        assert_eq!(json["permissionGranted"], serde_json::Value::Null);
        assert_eq!(json["loading"], true);
    }
}
