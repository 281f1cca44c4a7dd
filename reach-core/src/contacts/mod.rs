//! Local contact handling for invite matching.
//!
//! This module turns raw address-book entries into an ordered, deduplicated
//! list of [`ContactRecord`]s keyed by canonical phone number, merges remote
//! registration status onto them and filters them for display.
//!
//! # Pipeline
//!
//! ```text
//! ContactSource (platform address book)
//!     │
//!     ▼
//! LocalContactLoader ── normalize_phone() ── dedup by canonical number
//!     │
//!     ▼
//! merge_contacts() ◄── RemoteStatus (from RemoteMatcher)
//!     │
//!     ▼
//! filter_contacts() ── current filter text
//! ```
//!
//! # Identity
//!
//! A contact's identity for dedup and merge is its canonical phone number,
//! never the platform's local id. Two address-book entries sharing a number
//! collapse to the first one seen.

mod error;
mod loader;
mod merge;
pub mod phone;
pub mod types;

pub use error::{ContactsError, Result};
pub use loader::{build_records, ContactSource, LocalContactLoader};
pub use merge::{apply_remote_status, filter_contacts, merge_contacts, sort_contacts};
pub use phone::{
    clean_number, format_phone, is_canonical, normalize_phone, normalize_with_hint, RegionHint,
};
pub use types::{initials, ContactRecord, RawContact, RemoteStatus};
