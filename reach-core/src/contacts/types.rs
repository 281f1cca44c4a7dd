//! Core types for contact matching.
//!
//! [`RawContact`] is what the platform address book hands us,
//! [`ContactRecord`] is the normalized view the rest of the core works
//! with, and [`RemoteStatus`] is the per-number answer from the identity
//! service.

use serde::{Deserialize, Serialize};

use super::phone::format_phone;

/// An address-book entry as enumerated by the platform.
///
/// Entries arrive ordered by display name ascending. Phone numbers are raw
/// device strings and have not been validated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawContact {
    /// Opaque platform identifier.
    pub id: String,
    /// Display name, if the entry has one.
    pub display_name: Option<String>,
    /// Raw phone numbers attached to the entry.
    pub phone_numbers: Vec<String>,
}

impl RawContact {
    /// Creates a raw contact with a display name and phone numbers.
    #[must_use]
    pub fn new<I, S>(id: impl Into<String>, display_name: impl Into<String>, phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            display_name: Some(display_name.into()),
            phone_numbers: phones.into_iter().map(Into::into).collect(),
        }
    }
}

/// A local contact with a canonical phone number and match status.
///
/// One record exists per canonical number; an address-book entry with
/// several numbers yields several records sharing `id` and `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    /// Opaque platform identifier of the source entry.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Canonical international number; unique within a load.
    pub canonical_phone: String,
    /// Presentation form of `canonical_phone`.
    pub formatted_phone: String,
    /// Up to two initials derived from `name`.
    pub initials: String,
    /// Whether an invite has been sent to this number.
    pub invited: bool,
    /// Whether this number belongs to a registered user.
    pub registered: bool,
}

impl ContactRecord {
    /// Creates an unmatched record, deriving the formatted number and
    /// initials.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        canonical_phone: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let canonical_phone = canonical_phone.into();
        Self {
            id: id.into(),
            initials: initials(&name),
            formatted_phone: format_phone(&canonical_phone),
            name,
            canonical_phone,
            invited: false,
            registered: false,
        }
    }

    /// Returns a copy with the given match status.
    #[must_use]
    pub fn with_status(self, registered: bool, invited: bool) -> Self {
        Self {
            registered,
            invited,
            ..self
        }
    }
}

/// Registration and invite status for one number, as reported remotely.
///
/// Produced fresh for each sync attempt and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteStatus {
    /// Number the status applies to.
    pub canonical_phone: String,
    /// Whether the number belongs to a registered user.
    pub registered: bool,
    /// Whether the number has already been invited.
    pub invited: bool,
}

/// Derives display initials from a contact name.
///
/// Names of at least three characters containing a space yield the first
/// character of each of the first two space-separated tokens; any other
/// non-empty name yields its first character.
///
/// # Example
///
/// ```
/// use reach_core::contacts::initials;
///
/// assert_eq!(initials("Alice Smith"), "AS");
/// assert_eq!(initials("Bob"), "B");
/// assert_eq!(initials("A B"), "AB");
/// assert_eq!(initials(""), "");
/// ```
#[must_use]
pub fn initials(name: &str) -> String {
    if name.chars().count() >= 3 && name.contains(' ') {
        name.split(' ')
            .take(2)
            .filter_map(|token| token.chars().next())
            .collect()
    } else {
        name.chars().next().map(String::from).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_two_tokens() {
        assert_eq!(initials("Alice Smith"), "AS");
    }

    #[test]
    fn initials_only_first_two_tokens() {
        assert_eq!(initials("Mary Jane Watson"), "MJ");
    }

    #[test]
    fn initials_single_word() {
        assert_eq!(initials("Zoe"), "Z");
    }

    #[test]
    fn initials_short_name_with_space() {
        assert_eq!(initials("A "), "A");
    }

    #[test]
    fn initials_leading_space_skips_empty_token() {
        assert_eq!(initials(" Bob Lee"), "B");
    }

    #[test]
    fn initials_unicode() {
        assert_eq!(initials("Émile Zola"), "ÉZ");
    }

    #[test]
    fn initials_empty() {
        assert_eq!(initials(""), "");
    }

    #[test]
    fn new_record_derives_presentation_fields() {
        let record = ContactRecord::new("7", "Alice Smith", "+15551234567");
        assert_eq!(record.initials, "AS");
        assert_eq!(record.formatted_phone, "+1 555-123-4567");
        assert!(!record.invited);
        assert!(!record.registered);
    }

    #[test]
    fn with_status_sets_flags() {
        let record = ContactRecord::new("1", "Bob", "+15559876543").with_status(true, false);
        assert!(record.registered);
        assert!(!record.invited);
        assert_eq!(record.name, "Bob");
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = ContactRecord::new("1", "Bob", "+15559876543");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"canonicalPhone\":\"+15559876543\""));
        assert!(json.contains("\"formattedPhone\""));
    }

    #[test]
    fn raw_contact_new_collects_numbers() {
        let raw = RawContact::new("1", "Amy", ["555-0100", "555-0101"]);
        assert_eq!(raw.display_name.as_deref(), Some("Amy"));
        assert_eq!(raw.phone_numbers.len(), 2);
    }
}
