//! Merging remote status onto local contacts, ordering and filtering.
//!
//! All functions here are pure: they take a snapshot and return a new one.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::phone::normalize_phone;
use super::types::{ContactRecord, RemoteStatus};

/// Sets registration and invite flags from remote status.
///
/// Remote entries are matched by canonical number (re-normalized, since the
/// service may echo numbers in a different shape). Local records without a
/// remote entry get both flags cleared. Order is unchanged.
#[must_use]
pub fn apply_remote_status(
    local: Vec<ContactRecord>,
    remote: &[RemoteStatus],
) -> Vec<ContactRecord> {
    let lookup: HashMap<String, &RemoteStatus> = remote
        .iter()
        .map(|status| {
            let key = normalize_phone(&status.canonical_phone)
                .unwrap_or_else(|| status.canonical_phone.clone());
            (key, status)
        })
        .collect();

    local
        .into_iter()
        .map(|record| {
            let (registered, invited) = lookup
                .get(&record.canonical_phone)
                .map_or((false, false), |s| (s.registered, s.invited));
            record.with_status(registered, invited)
        })
        .collect()
}

/// Sorts contacts for display.
///
/// Registered contacts come first; within each group invited contacts come
/// before uninvited ones, then by name, then by canonical number.
#[must_use]
pub fn sort_contacts(mut contacts: Vec<ContactRecord>) -> Vec<ContactRecord> {
    contacts.sort_by(display_order);
    contacts
}

fn display_order(a: &ContactRecord, b: &ContactRecord) -> Ordering {
    (!a.registered)
        .cmp(&!b.registered)
        .then_with(|| (!a.invited).cmp(&!b.invited))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.canonical_phone.cmp(&b.canonical_phone))
}

/// Merges remote status onto local contacts and sorts the result.
///
/// With `remote` absent (the remote step failed or was skipped) every
/// record is unmatched and the same ordering applies.
///
/// # Example
///
/// ```
/// use reach_core::contacts::{merge_contacts, ContactRecord, RemoteStatus};
///
/// let local = vec![
///     ContactRecord::new("1", "Zoe", "+15550000001"),
///     ContactRecord::new("2", "Amy", "+15550000002"),
/// ];
/// let remote = vec![RemoteStatus {
///     canonical_phone: "+15550000001".to_string(),
///     registered: true,
///     invited: false,
/// }];
///
/// let merged = merge_contacts(local, Some(&remote));
/// assert_eq!(merged[0].name, "Zoe");
/// assert!(merged[0].registered);
/// ```
#[must_use]
pub fn merge_contacts(
    local: Vec<ContactRecord>,
    remote: Option<&[RemoteStatus]>,
) -> Vec<ContactRecord> {
    sort_contacts(apply_remote_status(local, remote.unwrap_or_default()))
}

/// Filters contacts by name or number.
///
/// Blank filter text returns the list unchanged. Otherwise a contact is kept
/// if its lower-cased name contains the lower-cased text, or its canonical
/// number contains the text verbatim. Order is preserved.
#[must_use]
pub fn filter_contacts(contacts: &[ContactRecord], filter_text: &str) -> Vec<ContactRecord> {
    if filter_text.trim().is_empty() {
        return contacts.to_vec();
    }

    let needle = filter_text.to_lowercase();
    contacts
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle) || c.canonical_phone.contains(filter_text)
        })
        .cloned()
        .collect()
}
