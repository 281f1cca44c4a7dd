//! Address-book loading.
//!
//! [`LocalContactLoader`] drives a platform [`ContactSource`], normalizes
//! every attached number and deduplicates by canonical number. The loader
//! never fails: an unavailable address book loads as empty.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use super::error::Result;
use super::phone::normalize_phone;
use super::types::{ContactRecord, RawContact};

/// Platform address-book access.
///
/// Implementations are provided by the host application. They must return
/// entries ordered by display name ascending and must return an empty list,
/// not an error, when the address book simply has no contacts.
///
/// # Example
///
/// ```ignore
/// use reach_core::contacts::{ContactSource, RawContact, Result};
///
/// struct DeviceContacts { /* platform handle */ }
///
/// #[async_trait::async_trait]
/// impl ContactSource for DeviceContacts {
///     async fn enumerate(&self) -> Result<Vec<RawContact>> {
///         // Query the platform store, sorted by display name
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait]
pub trait ContactSource: Send + Sync {
    /// Enumerates all address-book entries.
    ///
    /// # Errors
    ///
    /// Returns an error only when the store cannot be accessed.
    async fn enumerate(&self) -> Result<Vec<RawContact>>;
}

/// Loads local contacts as canonical, deduplicated records.
#[derive(Clone)]
pub struct LocalContactLoader {
    source: Arc<dyn ContactSource>,
}

impl LocalContactLoader {
    /// Creates a loader over the given source.
    #[must_use]
    pub fn new(source: Arc<dyn ContactSource>) -> Self {
        Self { source }
    }

    /// Loads and normalizes all local contacts.
    ///
    /// Returns an empty list if the source fails.
    pub async fn load(&self) -> Vec<ContactRecord> {
        match self.source.enumerate().await {
            Ok(entries) => build_records(entries),
            Err(e) => {
                log::warn!("Contact enumeration failed, treating as empty: {e}");
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for LocalContactLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalContactLoader").finish_non_exhaustive()
    }
}

/// Converts raw address-book entries into contact records.
///
/// Entries without a name or without numbers are skipped, as are numbers
/// that fail normalization. The first record seen for a canonical number
/// wins, and source order is preserved.
#[must_use]
pub fn build_records(entries: Vec<RawContact>) -> Vec<ContactRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for entry in entries {
        let Some(name) = entry.display_name.filter(|n| !n.is_empty()) else {
            continue;
        };

        for raw in &entry.phone_numbers {
            let Some(canonical) = normalize_phone(raw) else {
                log::trace!("Dropping unusable number for contact {}", entry.id);
                continue;
            };

            if seen.insert(canonical.clone()) {
                records.push(ContactRecord::new(entry.id.clone(), name.clone(), canonical));
            }
        }
    }

    records
}
