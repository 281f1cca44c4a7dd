//! API bridging layer that exposes reach-core functionality.
//!
//! The session itself lives on the Rust side; Dart receives published
//! [`reach_core::sync::SyncState`] snapshots as JSON and wraps them in
//! [`SyncStateView`] for typed access.

use flutter_rust_bridge::frb;
use reach_core::contacts::{self, ContactRecord, RegionHint};
use reach_core::sync::SyncState;
use reach_core::ReachConfig;

/// Normalizes a phone number to canonical `+<digits>` form.
///
/// `calling_code` is used for national-format input with a trunk `0`.
/// Returns `None` if the number is not usable.
#[frb(sync)]
#[must_use]
pub fn normalize_phone(raw: String, calling_code: Option<u16>) -> Option<String> {
    contacts::normalize_with_hint(&raw, calling_code.map(RegionHint::new))
}

/// Renders a canonical number for display.
#[frb(sync)]
#[must_use]
pub fn format_phone(canonical: String) -> String {
    contacts::format_phone(&canonical)
}

/// Derives up to two initials from a display name.
#[frb(sync)]
#[must_use]
pub fn contact_initials(name: String) -> String {
    contacts::initials(&name)
}

/// Session configuration (FFI wrapper).
#[derive(Debug, Clone, Default)]
#[frb(opaque)]
pub struct ReachSettings {
    inner: ReachConfig,
}

impl ReachSettings {
    /// Parses settings from JSON, defaulting missing fields.
    pub fn from_json(json: String) -> Result<Self, String> {
        ReachConfig::from_json(&json)
            .map(|inner| Self { inner })
            .map_err(|e| {
                log::debug!("Rejected settings JSON: {e}");
                format!("Invalid settings: {e}")
            })
    }

    /// Gets the rendered invite message.
    #[frb(sync)]
    #[must_use]
    pub fn invite_message(&self) -> String {
        self.inner.invite_message()
    }

    /// Gets the minimum length of a typed-in number.
    #[frb(sync)]
    #[must_use]
    pub fn min_custom_phone_len(&self) -> u32 {
        u32::try_from(self.inner.min_custom_phone_len).unwrap_or(u32::MAX)
    }

    /// Gets the region calling code, if one is configured.
    #[frb(sync)]
    #[must_use]
    pub fn calling_code(&self) -> Option<u16> {
        self.inner.region.map(|r| r.calling_code)
    }
}

/// Published session state (FFI wrapper).
#[derive(Debug, Clone, Default)]
#[frb(opaque)]
pub struct SyncStateView {
    inner: SyncState,
}

impl SyncStateView {
    /// Parses a published state snapshot.
    pub fn from_json(json: String) -> Result<Self, String> {
        serde_json::from_str(&json)
            .map(|inner| Self { inner })
            .map_err(|e| {
                log::debug!("Rejected state snapshot JSON: {e}");
                format!("Invalid state snapshot: {e}")
            })
    }

    /// Serializes the snapshot back to JSON.
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(&self.inner).map_err(|e| e.to_string())
    }

    /// Gets the permission answer, or `None` if not answered yet.
    #[frb(sync)]
    #[must_use]
    pub fn permission_granted(&self) -> Option<bool> {
        self.inner.permission_granted
    }

    /// Gets whether the permission prompt was shown.
    #[frb(sync)]
    #[must_use]
    pub fn permission_requested(&self) -> bool {
        self.inner.permission_requested
    }

    /// Gets whether the contact list is still loading.
    #[frb(sync)]
    #[must_use]
    pub fn loading(&self) -> bool {
        self.inner.loading
    }

    /// Gets the remaining invite allowance.
    #[frb(sync)]
    #[must_use]
    pub fn invite_count(&self) -> u32 {
        self.inner.invite_count
    }

    /// Gets the current search text.
    #[frb(sync)]
    #[must_use]
    pub fn filter_text(&self) -> String {
        self.inner.filter_text.clone()
    }

    /// Gets the contacts matching the search text.
    #[frb(sync)]
    #[must_use]
    pub fn filtered_contacts(&self) -> Vec<ContactView> {
        to_views(&self.inner.filtered_contacts)
    }

    /// Gets every loaded contact.
    #[frb(sync)]
    #[must_use]
    pub fn all_contacts(&self) -> Vec<ContactView> {
        to_views(&self.inner.all_contacts)
    }
}

fn to_views(contacts: &[ContactRecord]) -> Vec<ContactView> {
    contacts
        .iter()
        .cloned()
        .map(|inner| ContactView { inner })
        .collect()
}

/// A contact row (FFI wrapper).
#[derive(Debug, Clone)]
#[frb(opaque)]
pub struct ContactView {
    inner: ContactRecord,
}

impl ContactView {
    /// Gets the display name.
    #[frb(sync)]
    #[must_use]
    pub fn name(&self) -> String {
        self.inner.name.clone()
    }

    /// Gets the canonical number.
    #[frb(sync)]
    #[must_use]
    pub fn canonical_phone(&self) -> String {
        self.inner.canonical_phone.clone()
    }

    /// Gets the display form of the number.
    #[frb(sync)]
    #[must_use]
    pub fn formatted_phone(&self) -> String {
        self.inner.formatted_phone.clone()
    }

    /// Gets the avatar initials.
    #[frb(sync)]
    #[must_use]
    pub fn initials(&self) -> String {
        self.inner.initials.clone()
    }

    /// Gets whether the contact is a registered user.
    #[frb(sync)]
    #[must_use]
    pub fn registered(&self) -> bool {
        self.inner.registered
    }

    /// Gets whether an invite was sent to the contact.
    #[frb(sync)]
    #[must_use]
    pub fn invited(&self) -> bool {
        self.inner.invited
    }
}
