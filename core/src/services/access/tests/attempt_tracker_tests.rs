//! Unit tests for the attempt tracker

use std::sync::Arc;

use crate::domain::entities::account::{Account, AccountRole};
use crate::domain::entities::audit::AuditAction;
use crate::repositories::{
    AuditEventRepository, MockAccountRepository, MockAuditEventRepository,
};
use crate::services::access::{AccessServiceConfig, AttemptTracker};
use crate::services::audit::{AuditService, AuditServiceConfig};

fn tracker_for(
    account_repo: &Arc<MockAccountRepository>,
    audit_repo: &Arc<MockAuditEventRepository>,
) -> AttemptTracker<MockAccountRepository, MockAuditEventRepository> {
    let audit_service = Arc::new(AuditService::new(
        Arc::clone(audit_repo),
        AuditServiceConfig { async_writes: false },
    ));
    AttemptTracker::new(
        Arc::clone(account_repo),
        audit_service,
        AccessServiceConfig::default(),
    )
}

fn active_account() -> Account {
    let mut account = Account::new("user@x.com", "User", AccountRole::User);
    account.complete_first_access();
    account
}

#[tokio::test]
async fn test_threshold_crossing_reports_transition_once() {
    let account = active_account();
    let account_repo = Arc::new(MockAccountRepository::with_existing_account(account.clone()));
    let audit_repo = Arc::new(MockAuditEventRepository::new());
    let tracker = tracker_for(&account_repo, &audit_repo);

    assert!(!tracker.record_failure(&account).await.unwrap().just_blocked);
    assert!(!tracker.record_failure(&account).await.unwrap().just_blocked);

    let third = tracker.record_failure(&account).await.unwrap();
    assert!(third.just_blocked);
    assert_eq!(third.attempts, 3);

    let fourth = tracker.record_failure(&account).await.unwrap();
    assert!(!fourth.just_blocked);
    assert_eq!(
        audit_repo.count_by_action(AuditAction::Lockout).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_lockout_event_carries_email_and_reason() {
    let account = active_account();
    let account_repo = Arc::new(MockAccountRepository::with_existing_account(account.clone()));
    let audit_repo = Arc::new(MockAuditEventRepository::new());
    let tracker = tracker_for(&account_repo, &audit_repo);

    for _ in 0..3 {
        tracker.record_failure(&account).await.unwrap();
    }

    let events = audit_repo.get_all_events();
    let lockout = events
        .iter()
        .find(|e| e.action == AuditAction::Lockout)
        .expect("lockout event written");
    let after = lockout.after_state.as_ref().unwrap();
    assert_eq!(after["email"], "user@x.com");
    assert!(after["reason"].as_str().unwrap().contains("failed login"));
}

#[tokio::test]
async fn test_audit_failure_does_not_undo_the_block() {
    let account = active_account();
    let account_repo = Arc::new(MockAccountRepository::with_existing_account(account.clone()));
    let audit_repo = Arc::new(MockAuditEventRepository::new());
    audit_repo.set_should_fail(true);
    let tracker = tracker_for(&account_repo, &audit_repo);

    for _ in 0..3 {
        tracker.record_failure(&account).await.unwrap();
    }

    // Audit write failed, but the block committed (fail-open audit,
    // fail-closed block)
    let state = account_repo.get(account.id).unwrap();
    assert!(state.is_blocked);
}

#[tokio::test]
async fn test_record_success_only_resets_counter() {
    let mut account = active_account();
    account.failed_attempts = 2;
    account.block();
    let account_repo = Arc::new(MockAccountRepository::with_existing_account(account.clone()));
    let audit_repo = Arc::new(MockAuditEventRepository::new());
    let tracker = tracker_for(&account_repo, &audit_repo);

    tracker.record_success(&account).await.unwrap();

    let state = account_repo.get(account.id).unwrap();
    assert_eq!(state.failed_attempts, 0);
    // The block flag is a separate, privileged concern
    assert!(state.is_blocked);
}

#[tokio::test]
async fn test_master_admin_is_exempt() {
    let admin = Account::new("root@x.com", "Root", AccountRole::MasterAdmin);
    let account_repo = Arc::new(MockAccountRepository::with_existing_account(admin.clone()));
    let audit_repo = Arc::new(MockAuditEventRepository::new());
    let tracker = tracker_for(&account_repo, &audit_repo);

    for _ in 0..5 {
        let record = tracker.record_failure(&admin).await.unwrap();
        assert!(!record.just_blocked);
    }

    let state = account_repo.get(admin.id).unwrap();
    assert!(!state.is_blocked);
    assert_eq!(state.failed_attempts, 0);
}
