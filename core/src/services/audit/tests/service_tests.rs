//! Unit tests for the audit service

use std::sync::Arc;

use crate::domain::entities::audit::AuditAction;
use crate::repositories::{AuditEventRepository, MockAuditEventRepository};
use crate::services::audit::{AuditService, AuditServiceConfig};

fn sync_service(repo: &Arc<MockAuditEventRepository>) -> AuditService<MockAuditEventRepository> {
    AuditService::new(Arc::clone(repo), AuditServiceConfig { async_writes: false })
}

#[tokio::test]
async fn test_record_lockout_writes_event() {
    let repo = Arc::new(MockAuditEventRepository::new());
    let service = sync_service(&repo);

    service.record_lockout("user@x.com", "too many failed login attempts").await;

    let events = repo.get_all_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::Lockout);
    assert!(events[0].actor_email.is_none());
}

#[tokio::test]
async fn test_record_lockout_swallows_write_failure() {
    let repo = Arc::new(MockAuditEventRepository::new());
    repo.set_should_fail(true);
    let service = sync_service(&repo);

    // Must not panic or propagate: the block already committed
    service.record_lockout("user@x.com", "too many failed login attempts").await;
}

#[tokio::test]
async fn test_record_change_carries_actor_and_payloads() {
    let repo = Arc::new(MockAuditEventRepository::new());
    let service = sync_service(&repo);

    service
        .record_change(
            AuditAction::Update,
            "accounts",
            Some("admin@x.com"),
            Some(serde_json::json!({"is_blocked": true})),
            Some(serde_json::json!({"is_blocked": false})),
        )
        .await;

    let events = repo.get_all_events();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.actor_email.as_deref(), Some("admin@x.com"));
    assert_eq!(event.resource, "accounts");
    assert_eq!(event.before_state.as_ref().unwrap()["is_blocked"], true);
    assert_eq!(event.after_state.as_ref().unwrap()["is_blocked"], false);
}

#[tokio::test]
async fn test_record_change_swallows_write_failure() {
    let repo = Arc::new(MockAuditEventRepository::new());
    repo.set_should_fail(true);
    let service = sync_service(&repo);

    service
        .record_change(AuditAction::Insert, "accounts", None, None, None)
        .await;
}

#[tokio::test]
async fn test_async_writes_eventually_append() {
    let repo = Arc::new(MockAuditEventRepository::new());
    let service = AuditService::with_defaults(Arc::clone(&repo));

    service
        .record_change(AuditAction::Insert, "accounts", None, None, None)
        .await;

    // The write runs on a background task; give it a moment
    for _ in 0..50 {
        if !repo.get_all_events().is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(repo.get_all_events().len(), 1);
}

#[tokio::test]
async fn test_query_passthrough() {
    let repo = Arc::new(MockAuditEventRepository::new());
    let service = sync_service(&repo);

    service
        .record_change(AuditAction::Insert, "accounts", None, None, None)
        .await;
    service
        .record_change(AuditAction::Update, "payables", None, None, None)
        .await;

    let recent = service.recent_events(10).await.unwrap();
    assert_eq!(recent.len(), 2);

    let accounts_only = service.events_for_resource("accounts", 10).await.unwrap();
    assert_eq!(accounts_only.len(), 1);

    assert_eq!(repo.count_by_action(AuditAction::Update).await.unwrap(), 1);
}
