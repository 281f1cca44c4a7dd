//! Sync cycle orchestration.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::contacts::{
    apply_remote_status, sort_contacts, ContactRecord, LocalContactLoader, RemoteStatus,
};
use crate::identity::{IdentityKey, IdentityProvider};
use crate::invite::InviteTracker;
use crate::remote::{RemoteMatcher, RemoteResult};

use super::state::SyncState;

/// Publishing end of the session state.
///
/// `watch` keeps only the latest value; every update replaces the snapshot
/// under the channel's lock, which serializes writers.
pub type SharedState = Arc<watch::Sender<SyncState>>;

/// Phase of a sync cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Nothing ran (no identity available).
    Idle,
    /// Enumerating the address book.
    LoadingLocal,
    /// Uploading numbers and fetching their status.
    UploadingRemote,
    /// Remote status merged and published.
    Merged,
    /// Published without remote status.
    LocalOnly,
}

impl SyncPhase {
    /// Returns whether the cycle ended in this phase.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Idle | Self::Merged | Self::LocalOnly)
    }
}

/// Runs sync cycles and publishes their results.
#[derive(Clone)]
pub struct SyncOrchestrator {
    loader: LocalContactLoader,
    matcher: RemoteMatcher,
    identity: Arc<dyn IdentityProvider>,
    tracker: Arc<Mutex<InviteTracker>>,
    state: SharedState,
}

impl SyncOrchestrator {
    /// Creates an orchestrator publishing into `state`.
    #[must_use]
    pub fn new(
        loader: LocalContactLoader,
        matcher: RemoteMatcher,
        identity: Arc<dyn IdentityProvider>,
        tracker: Arc<Mutex<InviteTracker>>,
        state: SharedState,
    ) -> Self {
        Self {
            loader,
            matcher,
            identity,
            tracker,
            state,
        }
    }

    /// Runs one sync cycle and returns its terminal phase.
    ///
    /// Without an identity this is a no-op and the published state is left
    /// untouched, `loading` included. Otherwise `loading` is published as
    /// set before the address book is read. Remote failures are logged and degrade to a local-only
    /// view; they are never returned.
    pub async fn run_cycle(&self) -> SyncPhase {
        let Some(key) = self.identity.current_key() else {
            log::debug!("No identity available, skipping contact sync");
            return SyncPhase::Idle;
        };

        log::debug!("Sync phase: {:?}", SyncPhase::LoadingLocal);
        self.state
            .send_modify(|state| *state = std::mem::take(state).with_loading());
        let local = self.loader.load().await;

        if local.is_empty() {
            self.publish(local, None);
            log::debug!("No local contacts, sync finished: {:?}", SyncPhase::LocalOnly);
            return SyncPhase::LocalOnly;
        }

        log::debug!(
            "Sync phase: {:?} ({} contacts)",
            SyncPhase::UploadingRemote,
            local.len()
        );
        let numbers: BTreeSet<String> = local.iter().map(|c| c.canonical_phone.clone()).collect();

        match self.fetch_remote(&key, &numbers).await {
            Ok(remote) => {
                self.publish(local, Some(&remote));
                log::debug!("Sync finished: {:?}", SyncPhase::Merged);
                SyncPhase::Merged
            }
            Err(e) => {
                log::warn!(
                    "Contact matching failed for {}, showing local contacts only: {e}",
                    key.fingerprint()
                );
                self.publish(local, None);
                SyncPhase::LocalOnly
            }
        }
    }

    async fn fetch_remote(
        &self,
        key: &IdentityKey,
        numbers: &BTreeSet<String>,
    ) -> RemoteResult<Vec<RemoteStatus>> {
        let container = self.identity.container_id(key).await?;
        self.matcher.match_contacts(key, &container, numbers).await
    }

    fn publish(&self, local: Vec<ContactRecord>, remote: Option<&[RemoteStatus]>) {
        let matched = apply_remote_status(local, remote.unwrap_or_default());
        let contacts = sort_contacts(lock_tracker(&self.tracker).apply(matched));

        self.state
            .send_modify(|state| *state = std::mem::take(state).with_contacts(contacts));
    }
}

impl std::fmt::Debug for SyncOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncOrchestrator")
            .field("loader", &self.loader)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

/// Locks the invite ledger, recovering from poisoning.
///
/// The ledger is append-only, so a panic mid-update cannot leave it
/// inconsistent.
pub(crate) fn lock_tracker(tracker: &Mutex<InviteTracker>) -> MutexGuard<'_, InviteTracker> {
    tracker.lock().unwrap_or_else(PoisonError::into_inner)
}
