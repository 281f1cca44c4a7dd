//! Reusable test helpers for session-level integration tests.
//!
//! Every collaborator is an in-memory fake from `reach_core::testing`, so a
//! [`Session`] runs the full pipeline without any platform or network.

#![allow(dead_code)]

use std::sync::Arc;

use reach_core::contacts::RawContact;
use reach_core::invite::WhitelistResult;
use reach_core::testing::{
    raw_contacts, test_identity, FakeQuotaService, FakeRemoteService, MemoryContactSource,
    RecordingDispatcher, StaticIdentity,
};
use reach_core::{Collaborators, ReachConfig, ReachCore};

/// A session together with handles to its fakes.
pub struct Session {
    pub core: ReachCore,
    pub identity: Arc<StaticIdentity>,
    pub remote: Arc<FakeRemoteService>,
    pub quota: Arc<FakeQuotaService>,
    pub dispatcher: Arc<RecordingDispatcher>,
}

/// Builder for [`Session`]s.
pub struct SessionBuilder {
    config: ReachConfig,
    contacts: MemoryContactSource,
    identity: StaticIdentity,
    remote: FakeRemoteService,
    quota: FakeQuotaService,
    dispatcher: RecordingDispatcher,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            config: ReachConfig::default(),
            contacts: MemoryContactSource::new(raw_contacts()),
            identity: test_identity(),
            remote: FakeRemoteService::default(),
            quota: FakeQuotaService::new(WhitelistResult::Sent, 5),
            dispatcher: RecordingDispatcher::default(),
        }
    }
}

impl SessionBuilder {
    pub fn config(mut self, config: ReachConfig) -> Self {
        self.config = config;
        self
    }

    pub fn contacts(mut self, entries: Vec<RawContact>) -> Self {
        self.contacts = MemoryContactSource::new(entries);
        self
    }

    pub fn contact_source(mut self, source: MemoryContactSource) -> Self {
        self.contacts = source;
        self
    }

    pub fn identity(mut self, identity: StaticIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn remote(mut self, remote: FakeRemoteService) -> Self {
        self.remote = remote;
        self
    }

    pub fn quota(mut self, quota: FakeQuotaService) -> Self {
        self.quota = quota;
        self
    }

    pub fn dispatcher(mut self, dispatcher: RecordingDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn build(self) -> Session {
        let identity = Arc::new(self.identity);
        let remote = Arc::new(self.remote);
        let quota = Arc::new(self.quota);
        let dispatcher = Arc::new(self.dispatcher);

        let core = ReachCore::new(
            self.config,
            Collaborators {
                contacts: Arc::new(self.contacts),
                identity: identity.clone(),
                remote: remote.clone(),
                quota: quota.clone(),
                dispatcher: dispatcher.clone(),
            },
        );

        Session {
            core,
            identity,
            remote,
            quota,
            dispatcher,
        }
    }
}

/// Names of the published contacts, in display order.
pub fn contact_names(core: &ReachCore) -> Vec<String> {
    core.state()
        .all_contacts
        .into_iter()
        .map(|c| c.name)
        .collect()
}

/// Names of the filtered contacts, in display order.
pub fn filtered_names(core: &ReachCore) -> Vec<String> {
    core.state()
        .filtered_contacts
        .into_iter()
        .map(|c| c.name)
        .collect()
}
