//! Unit tests for the administrative lifecycle service

use std::sync::Arc;

use fd_shared::config::AccessPolicyConfig;

use crate::domain::entities::account::{Account, AccountRole};
use crate::domain::entities::audit::AuditAction;
use crate::errors::{AccessError, DomainError};
use crate::repositories::{
    AccountRepository, AuditEventRepository, MockAccountRepository, MockAuditEventRepository,
};
use crate::services::admin::{AccountInvite, AdminService};
use crate::services::audit::{AuditService, AuditServiceConfig};

use super::mocks::{MockEmailSender, MockIdentityProvider};

type TestAdminService = AdminService<
    MockAccountRepository,
    MockIdentityProvider,
    MockEmailSender,
    MockAuditEventRepository,
>;

struct TestHarness {
    service: TestAdminService,
    account_repo: Arc<MockAccountRepository>,
    identity: Arc<MockIdentityProvider>,
    email: Arc<MockEmailSender>,
    audit_repo: Arc<MockAuditEventRepository>,
}

fn harness() -> TestHarness {
    let account_repo = Arc::new(MockAccountRepository::new());
    let identity = Arc::new(MockIdentityProvider::new());
    let email = Arc::new(MockEmailSender::new());
    let audit_repo = Arc::new(MockAuditEventRepository::new());
    let audit_service = Arc::new(AuditService::new(
        Arc::clone(&audit_repo),
        AuditServiceConfig { async_writes: false },
    ));
    let service = AdminService::new(
        Arc::clone(&account_repo),
        Arc::clone(&identity),
        Arc::clone(&email),
        audit_service,
        AccessPolicyConfig::default(),
    );

    TestHarness {
        service,
        account_repo,
        identity,
        email,
        audit_repo,
    }
}

fn master_admin() -> Account {
    let mut admin = Account::new("root@x.com", "Root", AccountRole::MasterAdmin);
    admin.complete_first_access();
    admin
}

fn plain_user() -> Account {
    let mut user = Account::new("user@x.com", "User", AccountRole::User);
    user.complete_first_access();
    user
}

fn invite_for(email: &str) -> AccountInvite {
    AccountInvite {
        email: email.to_string(),
        display_name: "New User".to_string(),
        phone: Some("+55 11 98888-7777".to_string()),
        job_title: Some("Analista Financeiro".to_string()),
        role: AccountRole::User,
    }
}

#[tokio::test]
async fn test_invite_creates_pending_account_and_emails_credential() {
    let h = harness();
    let admin = master_admin();

    let account = h
        .service
        .invite(&admin, invite_for("novo@empresa.com"))
        .await
        .unwrap();

    assert!(account.first_access_required);
    assert_eq!(account.role, AccountRole::User);

    let (email, password) = h
        .identity
        .registered_credential(account.id)
        .expect("credential registered at the provider");
    assert_eq!(email, "novo@empresa.com");

    let sent = h.email.sent_messages();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].2.contains(&password));

    assert_eq!(
        h.audit_repo.count_by_action(AuditAction::Insert).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_invite_forbidden_for_non_master() {
    let h = harness();
    let caller = plain_user();

    let result = h.service.invite(&caller, invite_for("novo@empresa.com")).await;

    assert!(matches!(
        result,
        Err(DomainError::Access(AccessError::Forbidden))
    ));
    assert!(!h.account_repo.exists_by_email("novo@empresa.com").await.unwrap());
}

#[tokio::test]
async fn test_invite_rejects_duplicate_email() {
    let h = harness();
    let admin = master_admin();
    h.service
        .invite(&admin, invite_for("novo@empresa.com"))
        .await
        .unwrap();

    let result = h.service.invite(&admin, invite_for("Novo@Empresa.com")).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_invite_rejects_malformed_email() {
    let h = harness();
    let admin = master_admin();

    let result = h.service.invite(&admin, invite_for("not-an-email")).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_invite_rolls_back_row_when_provider_fails() {
    let h = harness();
    let admin = master_admin();
    h.identity.set_fail_register(true);

    let result = h.service.invite(&admin, invite_for("novo@empresa.com")).await;

    assert!(matches!(result, Err(DomainError::Provider { .. })));
    assert!(!h.account_repo.exists_by_email("novo@empresa.com").await.unwrap());
}

#[tokio::test]
async fn test_block_forbidden_for_non_master() {
    let h = harness();
    let caller = plain_user();
    let target = plain_user();
    let target_id = {
        let mut t = target;
        t.email = "target@x.com".to_string();
        let id = t.id;
        h.account_repo.push(t);
        id
    };

    let result = h.service.block(&caller, target_id).await;

    assert!(matches!(
        result,
        Err(DomainError::Access(AccessError::Forbidden))
    ));
    assert!(!h.account_repo.get(target_id).unwrap().is_blocked);
}

#[tokio::test]
async fn test_master_admin_target_cannot_be_blocked() {
    let h = harness();
    let admin = master_admin();
    let mut other_master = master_admin();
    other_master.email = "root2@x.com".to_string();
    let target_id = other_master.id;
    h.account_repo.push(other_master);

    let result = h.service.block(&admin, target_id).await;

    assert!(matches!(
        result,
        Err(DomainError::Access(AccessError::Forbidden))
    ));
    assert!(!h.account_repo.get(target_id).unwrap().is_blocked);
}

#[tokio::test]
async fn test_block_and_unblock_round_trip() {
    let h = harness();
    let admin = master_admin();
    let target = plain_user();
    let target_id = target.id;
    h.account_repo.push(target);

    h.service.block(&admin, target_id).await.unwrap();
    assert!(h.account_repo.get(target_id).unwrap().is_blocked);

    h.service.unblock(&admin, target_id).await.unwrap();
    let state = h.account_repo.get(target_id).unwrap();
    assert!(!state.is_blocked);
    assert_eq!(state.failed_attempts, 0);

    assert_eq!(
        h.audit_repo.count_by_action(AuditAction::Update).await.unwrap(),
        2
    );
}

#[tokio::test]
async fn test_unblock_is_idempotent_and_zeroes_counter() {
    let h = harness();
    let admin = master_admin();
    let mut target = plain_user();
    target.failed_attempts = 2;
    let target_id = target.id;
    h.account_repo.push(target);

    // Target was never blocked; unblocking must still reset the counter
    h.service.unblock(&admin, target_id).await.unwrap();

    let state = h.account_repo.get(target_id).unwrap();
    assert!(!state.is_blocked);
    assert_eq!(state.failed_attempts, 0);
}

#[tokio::test]
async fn test_master_admin_target_cannot_be_deleted() {
    let h = harness();
    let admin = master_admin();
    let mut other_master = master_admin();
    other_master.email = "root2@x.com".to_string();
    let target_id = other_master.id;
    h.account_repo.push(other_master);

    let result = h.service.delete(&admin, target_id).await;

    assert!(matches!(
        result,
        Err(DomainError::Access(AccessError::Forbidden))
    ));
    assert!(h.account_repo.get(target_id).is_some());
}

#[tokio::test]
async fn test_delete_removes_account_and_audits_before_state() {
    let h = harness();
    let admin = master_admin();
    let target = plain_user();
    let target_id = target.id;
    h.account_repo.push(target);

    h.service.delete(&admin, target_id).await.unwrap();

    assert!(h.account_repo.get(target_id).is_none());
    let events = h.audit_repo.get_all_events();
    let delete_event = events
        .iter()
        .find(|e| e.action == AuditAction::Delete)
        .expect("delete audit event written");
    assert!(delete_event.before_state.is_some());
    assert!(delete_event.after_state.is_none());
}

#[tokio::test]
async fn test_update_profile_by_owner() {
    let h = harness();
    let user = plain_user();
    let id = user.id;
    h.account_repo.push(user.clone());

    let updated = h
        .service
        .update_profile(
            &user,
            id,
            Some("User Renamed".to_string()),
            None,
            Some("Coordenador".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(updated.display_name, "User Renamed");
    assert_eq!(updated.job_title.as_deref(), Some("Coordenador"));
}

#[tokio::test]
async fn test_update_profile_forbidden_for_third_party() {
    let h = harness();
    let caller = plain_user();
    let mut target = plain_user();
    target.email = "target@x.com".to_string();
    let target_id = target.id;
    h.account_repo.push(target);

    let result = h
        .service
        .update_profile(&caller, target_id, Some("Hijacked".to_string()), None, None)
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Access(AccessError::Forbidden))
    ));
}
