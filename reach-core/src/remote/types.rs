//! Wire shapes exchanged with the identity service.
//!
//! All messages are JSON with camelCase field names. Container ids travel
//! base64-encoded and keys travel as public-key hex; secret material never
//! appears in a request body.

use serde::{Deserialize, Serialize};

use crate::contacts::RemoteStatus;
use crate::identity::{ContainerId, IdentityKey};

/// Body of the contact upload call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadContactsRequest {
    /// Uploader's public key (hex).
    pub owner_public_key: String,
    /// Target data container (base64).
    pub container_id: String,
    /// Canonical numbers to upload.
    pub phone_numbers: Vec<String>,
}

impl UploadContactsRequest {
    /// Builds an upload request for the given numbers.
    #[must_use]
    pub fn new<I>(key: &IdentityKey, container: &ContainerId, phone_numbers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            owner_public_key: key.public_hex(),
            container_id: container.to_base64(),
            phone_numbers: phone_numbers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome code of the contact upload call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadResultCode {
    /// The numbers were stored.
    Ok,
    /// The service refused the upload (bad signature, wrong container).
    Denied,
}

/// Response of the contact upload call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadContactsResponse {
    /// Outcome code.
    pub result: UploadResultCode,
}

/// Body of the status fetch call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchStatusRequest {
    /// Requester's public key (hex).
    pub owner_public_key: String,
    /// Data container to query (base64).
    pub container_id: String,
}

impl FetchStatusRequest {
    /// Builds a status request for the given container.
    #[must_use]
    pub fn new(key: &IdentityKey, container: &ContainerId) -> Self {
        Self {
            owner_public_key: key.public_hex(),
            container_id: container.to_base64(),
        }
    }
}

/// One entry of the status fetch response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactStatusEntry {
    /// Number as echoed by the service.
    pub phone_number: String,
    /// Whether the number belongs to a registered user.
    #[serde(default)]
    pub is_registered: bool,
    /// Whether the number has been invited.
    #[serde(default)]
    pub is_invited: bool,
}

impl From<ContactStatusEntry> for RemoteStatus {
    fn from(entry: ContactStatusEntry) -> Self {
        Self {
            canonical_phone: entry.phone_number,
            registered: entry.is_registered,
            invited: entry.is_invited,
        }
    }
}

/// Response of the status fetch call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactStatusResponse {
    /// Status of every uploaded number the service knows about.
    #[serde(default)]
    pub contacts: Vec<ContactStatusEntry>,
}

impl ContactStatusResponse {
    /// Converts the response into per-number statuses.
    #[must_use]
    pub fn into_statuses(self) -> Vec<RemoteStatus> {
        self.contacts.into_iter().map(RemoteStatus::from).collect()
    }
}
