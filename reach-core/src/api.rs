//! Session API exposed to the UI layer.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::config::ReachConfig;
use crate::contacts::{clean_number, is_canonical, ContactSource, LocalContactLoader};
use crate::identity::IdentityProvider;
use crate::invite::{
    InviteOutcome, InviteQuotaService, InviteResult, InviteTracker, MessageDispatcher, SentInvite,
    WhitelistResult,
};
use crate::remote::{RemoteIdentityService, RemoteMatcher};
use crate::sync::{lock_tracker, SharedState, SyncOrchestrator, SyncPhase, SyncState};

/// External collaborators provided by the host application.
#[derive(Clone)]
pub struct Collaborators {
    /// Platform address book.
    pub contacts: Arc<dyn ContactSource>,
    /// Session identity.
    pub identity: Arc<dyn IdentityProvider>,
    /// Identity service used for contact matching.
    pub remote: Arc<dyn RemoteIdentityService>,
    /// Invite allowance and whitelisting.
    pub quota: Arc<dyn InviteQuotaService>,
    /// Platform message hand-off.
    pub dispatcher: Arc<dyn MessageDispatcher>,
}

/// Result of reporting a contacts-permission answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    /// Permission was already granted; nothing happened.
    Unchanged,
    /// Permission granted; a sync cycle ran and ended in this phase.
    Synced(SyncPhase),
    /// Permission denied.
    Denied {
        /// The user already saw the prompt, so the UI should offer a link
        /// to the app's settings.
        open_settings: bool,
    },
}

/// Contact sync and invite session.
///
/// Owns the published [`SyncState`] and exposes the operations the invite
/// screen needs. All updates replace the published snapshot whole; readers
/// either take a copy with [`state`](Self::state) or follow changes through
/// [`subscribe`](Self::subscribe).
///
/// # Example
///
/// ```ignore
/// use reach_core::{Collaborators, ReachConfig, ReachCore};
///
/// let core = ReachCore::new(ReachConfig::default(), collaborators);
/// let mut updates = core.subscribe();
///
/// core.on_permission_requested();
/// core.request_permission_result(true).await;
///
/// core.set_filter_text("lee");
/// let visible = core.state().filtered_contacts;
/// ```
pub struct ReachCore {
    config: ReachConfig,
    state: SharedState,
    orchestrator: SyncOrchestrator,
    quota: Arc<dyn InviteQuotaService>,
    dispatcher: Arc<dyn MessageDispatcher>,
    tracker: Arc<Mutex<InviteTracker>>,
}

impl ReachCore {
    /// Creates a session with default state.
    #[must_use]
    pub fn new(config: ReachConfig, collaborators: Collaborators) -> Self {
        let (tx, _rx) = watch::channel(SyncState::default());
        let state = Arc::new(tx);
        let tracker = Arc::new(Mutex::new(InviteTracker::new()));

        let orchestrator = SyncOrchestrator::new(
            LocalContactLoader::new(collaborators.contacts),
            RemoteMatcher::new(collaborators.remote),
            collaborators.identity,
            tracker.clone(),
            state.clone(),
        );

        Self {
            config,
            state,
            orchestrator,
            quota: collaborators.quota,
            dispatcher: collaborators.dispatcher,
            tracker,
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &ReachConfig {
        &self.config
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> SyncState {
        self.state.borrow().clone()
    }

    /// Returns a receiver that observes every published state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    /// Records that the contacts-permission prompt was shown.
    pub fn on_permission_requested(&self) {
        self.state
            .send_modify(|state| *state = std::mem::take(state).with_permission_requested());
    }

    /// Reports the user's answer to the contacts-permission prompt.
    ///
    /// A grant starts a sync cycle and waits for it. A grant while
    /// permission is already granted returns [`PermissionOutcome::Unchanged`]
    /// without starting a cycle, even if one is still in flight; use
    /// [`resync`](Self::resync) to start another. Remote failures during the
    /// cycle never surface here.
    pub async fn request_permission_result(&self, granted: bool) -> PermissionOutcome {
        let mut was_requested = false;
        let changed = self.state.send_if_modified(|state| {
            if granted && state.permission_granted == Some(true) {
                return false;
            }
            was_requested = state.permission_requested;
            *state = std::mem::take(state).with_permission(granted);
            true
        });

        if !changed {
            return PermissionOutcome::Unchanged;
        }

        if granted {
            PermissionOutcome::Synced(self.orchestrator.run_cycle().await)
        } else {
            PermissionOutcome::Denied {
                open_settings: was_requested,
            }
        }
    }

    /// Runs a sync cycle without a permission event (e.g. pull-to-refresh).
    pub async fn resync(&self) -> SyncPhase {
        self.orchestrator.run_cycle().await
    }

    /// Applies new search text to the contact list.
    pub fn set_filter_text(&self, filter_text: &str) {
        self.state
            .send_modify(|state| *state = std::mem::take(state).with_filter(filter_text));
    }

    /// Marks a contact invited without contacting any service.
    ///
    /// The number is also added to the session ledger so later sync cycles
    /// keep it flagged. Unknown numbers only reach the ledger.
    pub fn mark_invited_locally(&self, canonical_phone: &str) {
        lock_tracker(&self.tracker).record(canonical_phone);
        self.state
            .send_modify(|state| *state = std::mem::take(state).with_invited(canonical_phone));
    }

    /// Sends an invite to a canonical number.
    ///
    /// On [`InviteOutcome::QuotaExceeded`] nothing is dispatched and the
    /// contact stays uninvited.
    ///
    /// # Errors
    ///
    /// Returns an error if the quota service cannot be reached or the
    /// message cannot be handed off.
    pub async fn send_invite(&self, canonical_phone: &str) -> InviteResult<InviteOutcome> {
        let result = self.quota.whitelist(canonical_phone).await?;

        if result == WhitelistResult::QuotaExceeded {
            log::info!("Invite quota exhausted");
            return Ok(InviteOutcome::QuotaExceeded);
        }

        self.dispatcher
            .send_message(canonical_phone, &self.config.invite_message())?;
        self.mark_invited_locally(canonical_phone);

        Ok(result.into())
    }

    /// Sends an invite to a number typed in by the user.
    ///
    /// The input is normalized with the configured region. Numbers that are
    /// too short or not canonical yield [`InviteOutcome::InvalidPhone`]
    /// without any remote call.
    ///
    /// # Errors
    ///
    /// Same as [`send_invite`](Self::send_invite).
    pub async fn send_custom_invite(&self, raw_phone: &str) -> InviteResult<InviteOutcome> {
        let candidate = clean_number(raw_phone, self.config.region);

        if candidate.len() < self.config.min_custom_phone_len || !is_canonical(&candidate) {
            log::debug!("Rejected typed-in invite number ({} chars)", candidate.len());
            return Ok(InviteOutcome::InvalidPhone);
        }

        self.send_invite(&candidate).await
    }

    /// Refreshes the remaining invite allowance.
    ///
    /// # Errors
    ///
    /// Returns an error if the quota service cannot be reached; the
    /// published count is left unchanged.
    pub async fn refresh_invite_count(&self) -> InviteResult<u32> {
        let count = self.quota.invite_count().await?;
        self.state
            .send_modify(|state| *state = std::mem::take(state).with_invite_count(count));
        Ok(count)
    }

    /// Returns the invites sent during this session.
    #[must_use]
    pub fn sent_invites(&self) -> Vec<SentInvite> {
        lock_tracker(&self.tracker).sent().to_vec()
    }
}

impl std::fmt::Debug for ReachCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReachCore")
            .field("config", &self.config)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        raw_contacts, test_identity, FakeQuotaService, FakeRemoteService, MemoryContactSource,
        RecordingDispatcher, StaticIdentity,
    };

    struct Harness {
        core: ReachCore,
        remote: Arc<FakeRemoteService>,
        quota: Arc<FakeQuotaService>,
        dispatcher: Arc<RecordingDispatcher>,
    }

    fn harness_with(
        identity: StaticIdentity,
        remote: FakeRemoteService,
        quota: FakeQuotaService,
    ) -> Harness {
        let remote = Arc::new(remote);
        let quota = Arc::new(quota);
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let core = ReachCore::new(
            ReachConfig::default(),
            Collaborators {
                contacts: Arc::new(MemoryContactSource::new(raw_contacts())),
                identity: Arc::new(identity),
                remote: remote.clone(),
                quota: quota.clone(),
                dispatcher: dispatcher.clone(),
            },
        );
        Harness {
            core,
            remote,
            quota,
            dispatcher,
        }
    }

    fn harness() -> Harness {
        harness_with(
            test_identity(),
            FakeRemoteService::default(),
            FakeQuotaService::new(WhitelistResult::Sent, 5),
        )
    }

    #[test]
    fn new_session_is_loading() {
        let h = harness();
        let state = h.core.state();
        assert!(state.loading);
        assert_eq!(state.permission_granted, None);
    }

    #[tokio::test]
    async fn grant_runs_sync() {
        let h = harness();

        let outcome = h.core.request_permission_result(true).await;

        assert_eq!(outcome, PermissionOutcome::Synced(SyncPhase::Merged));
        let state = h.core.state();
        assert_eq!(state.permission_granted, Some(true));
        assert!(!state.loading);
        assert_eq!(state.all_contacts.len(), 3);
    }

    #[tokio::test]
    async fn repeated_grant_is_ignored() {
        let h = harness();
        h.core.request_permission_result(true).await;

        let outcome = h.core.request_permission_result(true).await;

        assert_eq!(outcome, PermissionOutcome::Unchanged);
        assert_eq!(h.remote.upload_calls(), 1);
    }

    #[tokio::test]
    async fn denial_before_prompt_does_not_offer_settings() {
        let h = harness();
        let outcome = h.core.request_permission_result(false).await;
        assert_eq!(
            outcome,
            PermissionOutcome::Denied {
                open_settings: false
            }
        );
        assert_eq!(h.core.state().permission_granted, Some(false));
    }

    #[tokio::test]
    async fn denial_after_prompt_offers_settings() {
        let h = harness();
        h.core.on_permission_requested();

        let outcome = h.core.request_permission_result(false).await;

        assert_eq!(
            outcome,
            PermissionOutcome::Denied {
                open_settings: true
            }
        );
        assert_eq!(h.remote.upload_calls(), 0);
    }

    #[tokio::test]
    async fn grant_after_denial_syncs() {
        let h = harness();
        h.core.request_permission_result(false).await;

        let outcome = h.core.request_permission_result(true).await;

        assert_eq!(outcome, PermissionOutcome::Synced(SyncPhase::Merged));
    }

    #[tokio::test]
    async fn filter_text_applies_to_published_contacts() {
        let h = harness();
        h.core.request_permission_result(true).await;

        h.core.set_filter_text("lee");

        let state = h.core.state();
        assert_eq!(state.filter_text, "lee");
        assert_eq!(state.filtered_contacts.len(), 1);
        assert_eq!(state.filtered_contacts[0].name, "Bob Lee");
        assert_eq!(state.all_contacts.len(), 3);
    }

    #[tokio::test]
    async fn send_invite_dispatches_and_marks() {
        let h = harness();
        h.core.request_permission_result(true).await;

        let outcome = h.core.send_invite("+15559876543").await.unwrap();

        assert_eq!(outcome, InviteOutcome::Sent);
        let sent = h.dispatcher.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "+15559876543");
        assert!(sent[0].1.contains("getcode.com/download"));

        let state = h.core.state();
        let bob = state
            .all_contacts
            .iter()
            .find(|c| c.canonical_phone == "+15559876543")
            .unwrap();
        assert!(bob.invited);
        assert_eq!(h.core.sent_invites().len(), 1);
    }

    #[tokio::test]
    async fn quota_exceeded_leaves_contact_uninvited() {
        let h = harness_with(
            test_identity(),
            FakeRemoteService::default(),
            FakeQuotaService::new(WhitelistResult::QuotaExceeded, 0),
        );
        h.core.request_permission_result(true).await;

        let outcome = h.core.send_invite("+15559876543").await.unwrap();

        assert_eq!(outcome, InviteOutcome::QuotaExceeded);
        assert!(h.dispatcher.sent().is_empty());
        assert!(h.core.state().all_contacts.iter().all(|c| !c.invited));
        assert!(h.core.sent_invites().is_empty());
    }

    #[tokio::test]
    async fn quota_service_failure_is_an_error() {
        let h = harness_with(
            test_identity(),
            FakeRemoteService::default(),
            FakeQuotaService::offline(),
        );

        let result = h.core.send_invite("+15559876543").await;

        assert!(result.is_err());
        assert!(h.dispatcher.sent().is_empty());
    }

    #[tokio::test]
    async fn short_custom_number_rejected_without_remote_call() {
        let h = harness();

        let outcome = h.core.send_custom_invite("123").await.unwrap();

        assert_eq!(outcome, InviteOutcome::InvalidPhone);
        assert!(h.quota.whitelisted().is_empty());
    }

    #[tokio::test]
    async fn custom_number_is_normalized_before_whitelisting() {
        let h = harness();

        let outcome = h.core.send_custom_invite("1 (555) 222-3333").await.unwrap();

        assert_eq!(outcome, InviteOutcome::Sent);
        assert_eq!(h.quota.whitelisted(), vec!["+15552223333".to_string()]);
    }

    #[tokio::test]
    async fn refresh_invite_count_publishes() {
        let h = harness();
        assert_eq!(h.core.refresh_invite_count().await.unwrap(), 5);
        assert_eq!(h.core.state().invite_count, 5);
    }

    #[tokio::test]
    async fn refresh_invite_count_failure_keeps_previous() {
        let h = harness_with(
            test_identity(),
            FakeRemoteService::default(),
            FakeQuotaService::offline(),
        );
        assert!(h.core.refresh_invite_count().await.is_err());
        assert_eq!(h.core.state().invite_count, 0);
    }

    #[tokio::test]
    async fn subscribers_see_published_contacts() {
        let h = harness();
        let mut rx = h.core.subscribe();

        h.core.request_permission_result(true).await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().all_contacts.len(), 3);
    }
}
