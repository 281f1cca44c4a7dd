//! JSON adapter for the identity service.
//!
//! Hosts that already have an authenticated HTTP (or RPC) client only need
//! to implement [`JsonTransport`]; [`JsonIdentityService`] takes care of
//! request construction and response decoding.

use async_trait::async_trait;

use super::error::{RemoteError, RemoteResult};
use super::matcher::RemoteIdentityService;
use super::types::{
    ContactStatusResponse, FetchStatusRequest, UploadContactsRequest, UploadContactsResponse,
    UploadResultCode,
};
use crate::contacts::RemoteStatus;
use crate::identity::{ContainerId, IdentityKey};

/// Path of the contact upload call.
pub const UPLOAD_CONTACTS_PATH: &str = "/v1/contacts/upload";

/// Path of the status fetch call.
pub const FETCH_STATUS_PATH: &str = "/v1/contacts/status";

/// A request/response channel carrying JSON bodies.
///
/// The transport signs requests with the session key and enforces its own
/// timeouts, reporting them as [`RemoteError::Timeout`].
#[async_trait]
pub trait JsonTransport: Send + Sync {
    /// Sends `body` to `path` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be completed.
    async fn post(&self, key: &IdentityKey, path: &str, body: String) -> RemoteResult<String>;
}

/// [`RemoteIdentityService`] speaking JSON over a [`JsonTransport`].
#[derive(Debug, Clone)]
pub struct JsonIdentityService<T> {
    transport: T,
}

impl<T: JsonTransport> JsonIdentityService<T> {
    /// Creates a service over the given transport.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: JsonTransport> RemoteIdentityService for JsonIdentityService<T> {
    async fn upload_contacts(
        &self,
        key: &IdentityKey,
        container: &ContainerId,
        phone_numbers: &[String],
    ) -> RemoteResult<()> {
        let request = UploadContactsRequest::new(key, container, phone_numbers.iter().cloned());
        let body = serde_json::to_string(&request)?;

        let response = self.transport.post(key, UPLOAD_CONTACTS_PATH, body).await?;
        let response: UploadContactsResponse = serde_json::from_str(&response)?;

        match response.result {
            UploadResultCode::Ok => Ok(()),
            UploadResultCode::Denied => Err(RemoteError::Rejected(
                "contact upload denied".to_string(),
            )),
        }
    }

    async fn fetch_contact_status(
        &self,
        key: &IdentityKey,
        container: &ContainerId,
    ) -> RemoteResult<Vec<RemoteStatus>> {
        let body = serde_json::to_string(&FetchStatusRequest::new(key, container))?;

        let response = self.transport.post(key, FETCH_STATUS_PATH, body).await?;
        let response: ContactStatusResponse = serde_json::from_str(&response)?;

        Ok(response.into_statuses())
    }
}
