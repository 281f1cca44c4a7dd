//! Remote identity service access.
//!
//! The identity service learns which of the user's contacts are registered
//! or already invited. Matching is a two-step exchange scoped to the
//! caller's key and data container:
//!
//! ```text
//! RemoteMatcher
//!     │  1. upload_contacts(key, container, numbers)
//!     │  2. fetch_contact_status(key, container)
//!     ▼
//! RemoteIdentityService (host transport, or JsonIdentityService)
//! ```
//!
//! A failure at either step fails the whole match; there are no partial
//! results and no retries at this layer.

mod error;
mod json;
mod matcher;
pub mod types;

pub use error::{RemoteError, RemoteResult};
pub use json::{JsonIdentityService, JsonTransport, FETCH_STATUS_PATH, UPLOAD_CONTACTS_PATH};
pub use matcher::{RemoteIdentityService, RemoteMatcher};
pub use types::{
    ContactStatusEntry, ContactStatusResponse, FetchStatusRequest, UploadContactsRequest,
    UploadContactsResponse, UploadResultCode,
};
