//! Integration tests for sending invites.
//!
//! These tests verify:
//! - Quota exhaustion leaves the contact uninvited and sends nothing
//! - Typed-in numbers are validated before any service call
//! - Sent invites survive later sync cycles
//! - The invite allowance is published into session state

mod helpers;

use helpers::SessionBuilder;
use reach_core::contacts::RegionHint;
use reach_core::invite::{InviteError, InviteOutcome, WhitelistResult};
use reach_core::remote::RemoteError;
use reach_core::testing::{FakeQuotaService, FakeRemoteService, RecordingDispatcher};
use reach_core::ReachConfig;

#[tokio::test]
async fn quota_exceeded_sends_nothing() {
    let session = SessionBuilder::default()
        .quota(FakeQuotaService::new(WhitelistResult::QuotaExceeded, 0))
        .build();
    session.core.request_permission_result(true).await;

    let outcome = session.core.send_invite("+15551234567").await.unwrap();

    assert_eq!(outcome, InviteOutcome::QuotaExceeded);
    assert!(!outcome.is_sent());
    assert!(session.dispatcher.sent().is_empty());
    assert!(session.core.state().all_contacts.iter().all(|c| !c.invited));
}

#[tokio::test]
async fn short_custom_number_makes_no_remote_call() {
    let session = SessionBuilder::default().build();

    let outcome = session.core.send_custom_invite("123").await.unwrap();

    assert_eq!(outcome, InviteOutcome::InvalidPhone);
    assert!(session.quota.whitelisted().is_empty());
    assert!(session.dispatcher.sent().is_empty());
}

#[tokio::test]
async fn malformed_custom_number_is_rejected() {
    let session = SessionBuilder::default().build();

    for raw in ["+0123456789", "555-abc-defg", "+1234567890123456"] {
        let outcome = session.core.send_custom_invite(raw).await.unwrap();
        assert_eq!(outcome, InviteOutcome::InvalidPhone, "input {raw:?}");
    }
    assert!(session.quota.whitelisted().is_empty());
}

#[tokio::test]
async fn national_custom_number_uses_region() {
    let session = SessionBuilder::default()
        .config(ReachConfig::default().with_region(RegionHint::new(44)))
        .build();

    let outcome = session.core.send_custom_invite("07700 900123").await.unwrap();

    assert_eq!(outcome, InviteOutcome::Sent);
    assert_eq!(session.quota.whitelisted(), vec!["+447700900123".to_string()]);
    assert_eq!(session.dispatcher.sent()[0].0, "+447700900123");
}

#[tokio::test]
async fn custom_message_template_is_dispatched() {
    let session = SessionBuilder::default()
        .config(
            ReachConfig::default()
                .with_invite_template("Try it: {url}")
                .with_download_url("example.com/get"),
        )
        .build();

    session.core.send_invite("+15550000003").await.unwrap();

    assert_eq!(
        session.dispatcher.sent(),
        vec![("+15550000003".to_string(), "Try it: example.com/get".to_string())]
    );
}

#[tokio::test]
async fn sent_invite_survives_resync() {
    let session = SessionBuilder::default().build();
    session.core.request_permission_result(true).await;

    let outcome = session.core.send_invite("+15550000003").await.unwrap();
    assert_eq!(outcome, InviteOutcome::Sent);

    // The fake service never reports the invite back.
    session.core.resync().await;

    let state = session.core.state();
    let carol = state
        .all_contacts
        .iter()
        .find(|c| c.canonical_phone == "+15550000003")
        .unwrap();
    assert!(carol.invited);
    assert_eq!(state.all_contacts[0].name, "Carol King");

    let ledger = session.core.sent_invites();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].canonical_phone, "+15550000003");
}

#[tokio::test]
async fn invite_before_sync_is_applied_on_first_cycle() {
    let session = SessionBuilder::default()
        .remote(FakeRemoteService::default().with_status("+15551234567", true, false))
        .build();

    session.core.send_invite("+15559876543").await.unwrap();
    session.core.request_permission_result(true).await;

    let names: Vec<(String, bool, bool)> = session
        .core
        .state()
        .all_contacts
        .into_iter()
        .map(|c| (c.name, c.registered, c.invited))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Alice Smith".to_string(), true, false),
            ("Bob Lee".to_string(), false, true),
            ("Carol King".to_string(), false, false),
        ]
    );
}

#[tokio::test]
async fn offline_quota_service_surfaces_error() {
    let session = SessionBuilder::default()
        .quota(FakeQuotaService::offline())
        .build();

    let err = session.core.send_invite("+15551234567").await.unwrap_err();

    assert!(matches!(err, InviteError::Remote(RemoteError::Timeout(_))));
    assert!(session.core.sent_invites().is_empty());
}

#[tokio::test]
async fn failed_hand_off_leaves_contact_uninvited() {
    let session = SessionBuilder::default()
        .dispatcher(RecordingDispatcher::failing())
        .build();
    session.core.request_permission_result(true).await;

    let err = session.core.send_invite("+15550000003").await.unwrap_err();

    assert!(matches!(err, InviteError::Dispatch(_)));
    assert_eq!(session.quota.whitelisted(), vec!["+15550000003".to_string()]);
    assert!(session.core.sent_invites().is_empty());

    let state = session.core.state();
    let carol = state
        .all_contacts
        .iter()
        .find(|c| c.canonical_phone == "+15550000003")
        .unwrap();
    assert!(!carol.invited);

    session.core.resync().await;
    assert!(session.core.state().all_contacts.iter().all(|c| !c.invited));
}

#[tokio::test]
async fn invite_count_is_published() {
    let session = SessionBuilder::default()
        .quota(FakeQuotaService::new(WhitelistResult::Sent, 7))
        .build();
    let mut updates = session.core.subscribe();

    let count = session.core.refresh_invite_count().await.unwrap();

    assert_eq!(count, 7);
    assert_eq!(updates.borrow_and_update().invite_count, 7);
}
