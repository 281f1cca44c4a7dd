//! Phone number normalization and presentation.
//!
//! Device address books store numbers in whatever shape the user typed
//! them: `(555) 123-4567`, `+1 555 123 4567`, `0171 234567`. Everything
//! that leaves the device, and every dedup or merge key, uses the canonical
//! international form instead:
//!
//! ```text
//! ^\+[1-9]\d{7,14}$
//! ```
//!
//! Numbers that cannot be brought into that form are rejected with `None`.
//! Callers drop rejected numbers silently; a malformed number is never an
//! error.

use serde::{Deserialize, Serialize};

/// Minimum number of digits in a canonical number (excluding the `+`).
pub const MIN_CANONICAL_DIGITS: usize = 8;

/// Maximum number of digits in a canonical number (excluding the `+`).
pub const MAX_CANONICAL_DIGITS: usize = 15;

/// Characters removed from raw input before validation.
const SEPARATORS: [char; 4] = [' ', '(', ')', '-'];

/// Region information used when the raw input is in national format.
///
/// # Example
///
/// ```
/// use reach_core::contacts::{normalize_with_hint, RegionHint};
///
/// let uk = RegionHint::new(44);
/// assert_eq!(
///     normalize_with_hint("07700 900123", Some(uk)).as_deref(),
///     Some("+447700900123"),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionHint {
    /// International calling code without the `+` (e.g. `1`, `44`).
    pub calling_code: u16,
}

impl RegionHint {
    /// Creates a hint for the given calling code.
    #[must_use]
    pub const fn new(calling_code: u16) -> Self {
        Self { calling_code }
    }
}

/// Strips separators and forces a leading `+`, without validating.
///
/// When a region hint is given and the input is in national format (no `+`,
/// leading trunk `0`), the trunk prefix is replaced by the calling code.
/// The result may still be far from canonical; use [`is_canonical`] or
/// [`normalize_with_hint`] when validity matters.
///
/// # Example
///
/// ```
/// use reach_core::contacts::clean_number;
///
/// assert_eq!(clean_number("(555) 123-4567", None), "+5551234567");
/// assert_eq!(clean_number("123", None), "+123");
/// ```
#[must_use]
pub fn clean_number(raw: &str, hint: Option<RegionHint>) -> String {
    let stripped: String = raw.chars().filter(|c| !SEPARATORS.contains(c)).collect();

    if stripped.starts_with('+') {
        return stripped;
    }

    match (hint, stripped.strip_prefix('0')) {
        (Some(region), Some(national)) if !national.is_empty() => {
            format!("+{}{national}", region.calling_code)
        }
        _ => format!("+{stripped}"),
    }
}

/// Returns whether `candidate` is a canonical international number.
#[must_use]
pub fn is_canonical(candidate: &str) -> bool {
    let Some(digits) = candidate.strip_prefix('+') else {
        return false;
    };

    let bytes = digits.as_bytes();
    (MIN_CANONICAL_DIGITS..=MAX_CANONICAL_DIGITS).contains(&bytes.len())
        && matches!(bytes.first(), Some(b'1'..=b'9'))
        && bytes.iter().all(u8::is_ascii_digit)
}

/// Normalizes a raw device number to canonical form.
///
/// Equivalent to [`normalize_with_hint`] without a region hint.
///
/// # Example
///
/// ```
/// use reach_core::contacts::normalize_phone;
///
/// assert_eq!(normalize_phone("+1 (555) 123-4567").as_deref(), Some("+15551234567"));
/// assert_eq!(normalize_phone("12-34"), None);
/// ```
#[must_use]
pub fn normalize_phone(raw: &str) -> Option<String> {
    normalize_with_hint(raw, None)
}

/// Normalizes a raw number, using `hint` for national-format input.
///
/// Normalization is idempotent: a canonical number is returned unchanged.
#[must_use]
pub fn normalize_with_hint(raw: &str, hint: Option<RegionHint>) -> Option<String> {
    let candidate = clean_number(raw, hint);
    is_canonical(&candidate).then_some(candidate)
}

/// Renders a canonical number for display.
///
/// North American numbers get the familiar grouping; every other number is
/// shown in canonical form.
///
/// # Example
///
/// ```
/// use reach_core::contacts::format_phone;
///
/// assert_eq!(format_phone("+15551234567"), "+1 555-123-4567");
/// assert_eq!(format_phone("+447700900123"), "+447700900123");
/// ```
#[must_use]
pub fn format_phone(canonical: &str) -> String {
    match canonical.strip_prefix("+1") {
        Some(national) if national.len() == 10 && national.bytes().all(|b| b.is_ascii_digit()) => {
            format!(
                "+1 {}-{}-{}",
                &national[..3],
                &national[3..6],
                &national[6..]
            )
        }
        _ => canonical.to_string(),
    }
}
