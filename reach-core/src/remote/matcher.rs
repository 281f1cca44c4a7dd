//! Two-step remote matching of local contacts.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use super::error::RemoteResult;
use crate::contacts::RemoteStatus;
use crate::identity::{ContainerId, IdentityKey};

/// Remote identity service calls used for contact matching.
///
/// Transport, authentication and timeouts are the implementation's concern;
/// a timed-out call simply fails.
#[async_trait]
pub trait RemoteIdentityService: Send + Sync {
    /// Uploads canonical numbers into the caller's data container.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails for any reason.
    async fn upload_contacts(
        &self,
        key: &IdentityKey,
        container: &ContainerId,
        phone_numbers: &[String],
    ) -> RemoteResult<()>;

    /// Fetches registration and invite status for the container's numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails for any reason.
    async fn fetch_contact_status(
        &self,
        key: &IdentityKey,
        container: &ContainerId,
    ) -> RemoteResult<Vec<RemoteStatus>>;
}

/// Matches canonical numbers against the identity service.
#[derive(Clone)]
pub struct RemoteMatcher {
    service: Arc<dyn RemoteIdentityService>,
}

impl RemoteMatcher {
    /// Creates a matcher over the given service.
    #[must_use]
    pub fn new(service: Arc<dyn RemoteIdentityService>) -> Self {
        Self { service }
    }

    /// Uploads `phone_numbers` and fetches their status.
    ///
    /// The fetch only runs after a successful upload. A failure at either
    /// step is returned as-is; no partial results are produced and nothing
    /// is retried.
    ///
    /// # Errors
    ///
    /// Returns the first error from either remote call.
    pub async fn match_contacts(
        &self,
        key: &IdentityKey,
        container: &ContainerId,
        phone_numbers: &BTreeSet<String>,
    ) -> RemoteResult<Vec<RemoteStatus>> {
        let numbers: Vec<String> = phone_numbers.iter().cloned().collect();

        log::debug!(
            "Uploading {} numbers for {} into container {container}",
            numbers.len(),
            key.fingerprint()
        );
        self.service.upload_contacts(key, container, &numbers).await?;

        let statuses = self.service.fetch_contact_status(key, container).await?;
        log::debug!("Fetched status for {} numbers", statuses.len());

        Ok(statuses)
    }
}

impl std::fmt::Debug for RemoteMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteMatcher").finish_non_exhaustive()
    }
}
