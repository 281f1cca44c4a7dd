//! In-memory collaborators for tests.
//!
//! These stand in for the platform address book, the session identity, the
//! identity service, the invite quota service and the SMS hand-off. They
//! record every call so tests can assert on what the core did.
//!
//! **Not for production use.** Only compiled under `cfg(test)` or the
//! `test-utils` feature.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::contacts::{self, ContactSource, ContactsError, RawContact, RemoteStatus};
use crate::identity::{self, ContainerId, IdentityError, IdentityKey, IdentityProvider};
use crate::invite::{
    InviteError, InviteQuotaService, InviteResult, MessageDispatcher, WhitelistResult,
};
use crate::remote::{RemoteError, RemoteIdentityService, RemoteResult};

/// A small address book: three usable contacts plus one entry with an
/// unusable number and one duplicate number.
#[must_use]
pub fn raw_contacts() -> Vec<RawContact> {
    vec![
        RawContact::new("1", "Alice Smith", ["+1 (555) 123-4567"]),
        RawContact::new("2", "Bob Lee", ["1-555-987-6543"]),
        RawContact::new("3", "Bobby Lee", ["+1 555 987 6543"]),
        RawContact::new("4", "Carol King", ["+15550000003"]),
        RawContact::new("5", "Dave", ["12"]),
    ]
}

/// A fixed session key.
#[must_use]
pub fn test_key() -> IdentityKey {
    IdentityKey::new([0x11; 32], [0x22; 32])
}

/// An identity with [`test_key`] and a resolvable container.
#[must_use]
pub fn test_identity() -> StaticIdentity {
    StaticIdentity::new(test_key(), ContainerId::from_bytes(vec![0xc0; 16]))
}

/// Address book backed by a vector.
#[derive(Debug, Default)]
pub struct MemoryContactSource {
    entries: Vec<RawContact>,
    fail: bool,
}

impl MemoryContactSource {
    /// Creates a source yielding `entries`.
    #[must_use]
    pub fn new(entries: Vec<RawContact>) -> Self {
        Self {
            entries,
            fail: false,
        }
    }

    /// Creates a source whose enumeration always fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            entries: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl ContactSource for MemoryContactSource {
    async fn enumerate(&self) -> contacts::Result<Vec<RawContact>> {
        if self.fail {
            return Err(ContactsError::AccessDenied);
        }
        Ok(self.entries.clone())
    }
}

/// Identity with a fixed key and container.
#[derive(Debug, Default)]
pub struct StaticIdentity {
    key: Option<IdentityKey>,
    container: Option<ContainerId>,
    logged_out: AtomicBool,
}

impl StaticIdentity {
    /// Creates an identity with the given key and container.
    #[must_use]
    pub fn new(key: IdentityKey, container: ContainerId) -> Self {
        Self {
            key: Some(key),
            container: Some(container),
            logged_out: AtomicBool::new(false),
        }
    }

    /// Stops handing out the key, as after a logout.
    pub fn log_out(&self) {
        self.logged_out.store(true, Ordering::SeqCst);
    }

    /// Creates a provider with no key (logged out).
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Makes container resolution fail.
    #[must_use]
    pub fn without_container(self) -> Self {
        Self {
            container: None,
            ..self
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    fn current_key(&self) -> Option<IdentityKey> {
        if self.logged_out.load(Ordering::SeqCst) {
            return None;
        }
        self.key.clone()
    }

    async fn container_id(&self, _key: &IdentityKey) -> identity::Result<ContainerId> {
        self.container
            .clone()
            .ok_or_else(|| IdentityError::ContainerUnavailable("no local user".to_string()))
    }
}

/// Identity service answering from a fixed status list.
#[derive(Debug, Default)]
pub struct FakeRemoteService {
    statuses: Vec<RemoteStatus>,
    fail_upload: bool,
    fail_fetch: bool,
    delay: Option<Duration>,
    upload_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    uploaded: Mutex<Vec<String>>,
}

impl FakeRemoteService {
    /// Adds a status entry to every fetch response.
    #[must_use]
    pub fn with_status(mut self, phone: &str, registered: bool, invited: bool) -> Self {
        self.statuses.push(RemoteStatus {
            canonical_phone: phone.to_string(),
            registered,
            invited,
        });
        self
    }

    /// Makes every upload fail.
    #[must_use]
    pub fn failing_upload(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    /// Makes every fetch fail.
    #[must_use]
    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    /// Delays every fetch by `delay`.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of upload calls made.
    #[must_use]
    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    /// Number of fetch calls made.
    #[must_use]
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Numbers received by the most recent upload.
    #[must_use]
    pub fn uploaded(&self) -> Vec<String> {
        self.uploaded
            .lock()
            .map(|numbers| numbers.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RemoteIdentityService for FakeRemoteService {
    async fn upload_contacts(
        &self,
        _key: &IdentityKey,
        _container: &ContainerId,
        phone_numbers: &[String],
    ) -> RemoteResult<()> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut uploaded) = self.uploaded.lock() {
            *uploaded = phone_numbers.to_vec();
        }
        if self.fail_upload {
            return Err(RemoteError::Upload("service unavailable".to_string()));
        }
        Ok(())
    }

    async fn fetch_contact_status(
        &self,
        _key: &IdentityKey,
        _container: &ContainerId,
    ) -> RemoteResult<Vec<RemoteStatus>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_fetch {
            return Err(RemoteError::Fetch("service unavailable".to_string()));
        }
        Ok(self.statuses.clone())
    }
}

/// Quota service with a fixed answer.
#[derive(Debug)]
pub struct FakeQuotaService {
    result: WhitelistResult,
    count: u32,
    offline: bool,
    whitelisted: Mutex<Vec<String>>,
}

impl FakeQuotaService {
    /// Creates a service answering every whitelist call with `result`.
    #[must_use]
    pub fn new(result: WhitelistResult, count: u32) -> Self {
        Self {
            result,
            count,
            offline: false,
            whitelisted: Mutex::new(Vec::new()),
        }
    }

    /// Creates a service whose calls always fail.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            result: WhitelistResult::Sent,
            count: 0,
            offline: true,
            whitelisted: Mutex::new(Vec::new()),
        }
    }

    /// Numbers passed to `whitelist`, in call order.
    #[must_use]
    pub fn whitelisted(&self) -> Vec<String> {
        self.whitelisted
            .lock()
            .map(|numbers| numbers.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl InviteQuotaService for FakeQuotaService {
    async fn whitelist(&self, canonical_phone: &str) -> RemoteResult<WhitelistResult> {
        if let Ok(mut whitelisted) = self.whitelisted.lock() {
            whitelisted.push(canonical_phone.to_string());
        }
        if self.offline {
            return Err(RemoteError::Timeout("whitelist".to_string()));
        }
        Ok(self.result)
    }

    async fn invite_count(&self) -> RemoteResult<u32> {
        if self.offline {
            return Err(RemoteError::Timeout("invite count".to_string()));
        }
        Ok(self.count)
    }
}

/// Message dispatcher that records instead of sending.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingDispatcher {
    /// Creates a dispatcher that always fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Messages dispatched so far, as `(phone, body)`.
    #[must_use]
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

impl MessageDispatcher for RecordingDispatcher {
    fn send_message(&self, phone: &str, body: &str) -> InviteResult<()> {
        if self.fail {
            return Err(InviteError::Dispatch("no messaging app".to_string()));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((phone.to_string(), body.to_string()));
        }
        Ok(())
    }
}
