//! Unit tests for the credential verification service

use std::sync::Arc;

use crate::domain::entities::account::{Account, AccountRole};
use crate::domain::entities::audit::AuditAction;
use crate::domain::value_objects::LoginOutcome;
use crate::errors::DomainError;
use crate::repositories::{
    AuditEventRepository, MockAccountRepository, MockAuditEventRepository,
};
use crate::services::access::{AccessService, AccessServiceConfig, AttemptTracker};
use crate::services::audit::{AuditService, AuditServiceConfig};

use super::mocks::MockIdentityProvider;

type TestAccessService =
    AccessService<MockAccountRepository, MockIdentityProvider, MockAuditEventRepository>;

struct TestHarness {
    service: TestAccessService,
    account_repo: Arc<MockAccountRepository>,
    identity: Arc<MockIdentityProvider>,
    audit_repo: Arc<MockAuditEventRepository>,
}

fn harness_with(account: Account, password: &str) -> TestHarness {
    let identity = Arc::new(MockIdentityProvider::new().with_credential(&account, password));
    let account_repo = Arc::new(MockAccountRepository::with_existing_account(account));
    let audit_repo = Arc::new(MockAuditEventRepository::new());
    let audit_service = Arc::new(AuditService::new(
        Arc::clone(&audit_repo),
        AuditServiceConfig { async_writes: false },
    ));
    let tracker = Arc::new(AttemptTracker::new(
        Arc::clone(&account_repo),
        audit_service,
        AccessServiceConfig::default(),
    ));
    let service = AccessService::new(
        Arc::clone(&account_repo),
        Arc::clone(&identity),
        tracker,
        AccessServiceConfig::default(),
    );

    TestHarness {
        service,
        account_repo,
        identity,
        audit_repo,
    }
}

fn active_account() -> Account {
    let mut account = Account::new("a1@x.com", "A One", AccountRole::User);
    account.complete_first_access();
    account
}

#[tokio::test]
async fn test_successful_login_mints_session() {
    let account = active_account();
    let id = account.id;
    let h = harness_with(account, "Corr3ct!Pass");

    let outcome = h.service.login("a1@x.com", "Corr3ct!Pass").await.unwrap();

    match outcome {
        LoginOutcome::Success(session) => {
            assert_eq!(session.account_id, id);
            assert_eq!(session.email, "a1@x.com");
            assert!(!session.first_access_required);
            assert!(session.allows_normal_use());
        }
        other => panic!("expected success, got {other:?}"),
    }
    assert!(h.account_repo.get(id).unwrap().last_login_at.is_some());
}

#[tokio::test]
async fn test_login_is_case_insensitive_on_email() {
    let account = active_account();
    let h = harness_with(account, "Corr3ct!Pass");

    let outcome = h.service.login("A1@X.COM", "Corr3ct!Pass").await.unwrap();
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_three_failures_block_and_emit_one_lockout_event() {
    let account = active_account();
    let id = account.id;
    let h = harness_with(account, "Corr3ct!Pass");

    for _ in 0..3 {
        let outcome = h.service.login("a1@x.com", "wrong").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::InvalidCredentials { .. }));
    }

    let state = h.account_repo.get(id).unwrap();
    assert!(state.is_blocked);
    assert_eq!(state.failed_attempts, 3);
    assert_eq!(
        h.audit_repo.count_by_action(AuditAction::Lockout).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_only_the_tripping_failure_reports_lockout() {
    let account = active_account();
    let h = harness_with(account, "Corr3ct!Pass");

    for expected_trip in [false, false, true] {
        let outcome = h.service.login("a1@x.com", "wrong").await.unwrap();
        match outcome {
            LoginOutcome::InvalidCredentials { lockout_tripped } => {
                assert_eq!(lockout_tripped, expected_trip);
            }
            other => panic!("expected invalid credentials, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_second_failure_does_not_block() {
    let account = active_account();
    let id = account.id;
    let h = harness_with(account, "Corr3ct!Pass");

    h.service.login("a1@x.com", "wrong").await.unwrap();
    h.service.login("a1@x.com", "wrong").await.unwrap();

    let state = h.account_repo.get(id).unwrap();
    assert!(!state.is_blocked);
    assert_eq!(state.failed_attempts, 2);
    assert_eq!(
        h.audit_repo.count_by_action(AuditAction::Lockout).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_blocked_account_refused_even_with_correct_password() {
    let mut account = active_account();
    account.block();
    account.failed_attempts = 3;
    let id = account.id;
    let h = harness_with(account, "Corr3ct!Pass");

    let outcome = h.service.login("a1@x.com", "Corr3ct!Pass").await.unwrap();

    assert!(matches!(outcome, LoginOutcome::AccountBlocked));
    // No password comparison happened and the counter did not move
    assert_eq!(h.identity.sign_in_count(), 0);
    assert_eq!(h.account_repo.get(id).unwrap().failed_attempts, 3);
}

#[tokio::test]
async fn test_fourth_failure_emits_no_second_lockout() {
    let account = active_account();
    let h = harness_with(account, "Corr3ct!Pass");

    for _ in 0..3 {
        h.service.login("a1@x.com", "wrong").await.unwrap();
    }
    // Now blocked: a further attempt is refused before counting
    let outcome = h.service.login("a1@x.com", "wrong").await.unwrap();
    assert!(matches!(outcome, LoginOutcome::AccountBlocked));
    assert_eq!(
        h.audit_repo.count_by_action(AuditAction::Lockout).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_success_resets_counter_from_any_prior_value() {
    for prior in 1..=2 {
        let mut account = active_account();
        account.failed_attempts = prior;
        let id = account.id;
        let h = harness_with(account, "Corr3ct!Pass");

        let outcome = h.service.login("a1@x.com", "Corr3ct!Pass").await.unwrap();
        assert!(outcome.is_success());
        assert_eq!(h.account_repo.get(id).unwrap().failed_attempts, 0);
    }
}

#[tokio::test]
async fn test_unknown_email_runs_dummy_verification() {
    let account = active_account();
    let h = harness_with(account, "Corr3ct!Pass");

    let outcome = h.service.login("ghost@x.com", "whatever").await.unwrap();

    assert!(matches!(outcome, LoginOutcome::InvalidCredentials { .. }));
    // The dummy path still cost one provider round-trip
    assert_eq!(h.identity.sign_in_count(), 1);
}

#[tokio::test]
async fn test_empty_inputs_rejected_without_provider_call() {
    let account = active_account();
    let h = harness_with(account, "Corr3ct!Pass");

    let outcome = h.service.login("", "password").await.unwrap();
    assert!(matches!(outcome, LoginOutcome::InvalidCredentials { .. }));

    let outcome = h.service.login("a1@x.com", "").await.unwrap();
    assert!(matches!(outcome, LoginOutcome::InvalidCredentials { .. }));

    assert_eq!(h.identity.sign_in_count(), 0);
}

#[tokio::test]
async fn test_provider_outage_fails_closed() {
    let account = active_account();
    let h = harness_with(account, "Corr3ct!Pass");
    h.identity.set_unavailable(true);

    let result = h.service.login("a1@x.com", "Corr3ct!Pass").await;
    assert!(matches!(result, Err(DomainError::Provider { .. })));
}

#[tokio::test]
async fn test_storage_outage_fails_closed() {
    let account = active_account();
    let h = harness_with(account, "Corr3ct!Pass");
    h.account_repo.set_should_fail(true);

    let result = h.service.login("a1@x.com", "Corr3ct!Pass").await;
    assert!(matches!(result, Err(DomainError::Storage { .. })));
}

#[tokio::test]
async fn test_master_admin_is_never_blocked() {
    let mut admin = Account::new("root@x.com", "Root", AccountRole::MasterAdmin);
    admin.complete_first_access();
    let id = admin.id;
    let h = harness_with(admin, "Corr3ct!Pass");

    for _ in 0..5 {
        let outcome = h.service.login("root@x.com", "wrong").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::InvalidCredentials { .. }));
    }

    let state = h.account_repo.get(id).unwrap();
    assert!(!state.is_blocked);
    assert_eq!(state.failed_attempts, 0);
    assert_eq!(
        h.audit_repo.count_by_action(AuditAction::Lockout).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_first_access_account_gets_restricted_session() {
    let account = Account::new("new@x.com", "New", AccountRole::User);
    let h = harness_with(account, "Temp0r@ry!pw");

    let outcome = h.service.login("new@x.com", "Temp0r@ry!pw").await.unwrap();

    match outcome {
        LoginOutcome::Success(session) => {
            assert!(session.first_access_required);
            assert!(!session.allows_normal_use());
        }
        other => panic!("expected success, got {other:?}"),
    }
}
