//! Audit service for recording identity and data change events.
//!
//! Audit writes are fail-open: a failed write is logged and swallowed, and
//! must never roll back or block the operation it documents. The lockout
//! event is written synchronously inside the blocking transition so the
//! trail lines up with the state change it records.

use std::sync::Arc;
use tokio::task;
use tracing::{error, warn};

use crate::domain::entities::audit::{AuditAction, AuditEvent};
use crate::errors::DomainResult;
use crate::repositories::AuditEventRepository;

/// Configuration for the audit service
#[derive(Debug, Clone)]
pub struct AuditServiceConfig {
    /// Whether ordinary change events are written in a background task
    pub async_writes: bool,
}

impl Default for AuditServiceConfig {
    fn default() -> Self {
        Self { async_writes: true }
    }
}

/// Service for recording append-only audit events
pub struct AuditService<R>
where
    R: AuditEventRepository,
{
    repository: Arc<R>,
    config: AuditServiceConfig,
}

impl<R> AuditService<R>
where
    R: AuditEventRepository + 'static,
{
    /// Create a new audit service
    pub fn new(repository: Arc<R>, config: AuditServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Create a new audit service with default configuration
    pub fn with_defaults(repository: Arc<R>) -> Self {
        Self::new(repository, AuditServiceConfig::default())
    }

    /// Record the lockout of an account.
    ///
    /// Written synchronously so the event is durable by the time the caller
    /// returns, but a write failure only produces a log line: the block has
    /// already committed and stands on its own.
    pub async fn record_lockout(&self, account_email: &str, reason: &str) {
        let event = AuditEvent::lockout(account_email, reason);
        if let Err(e) = self.repository.append(&event).await {
            error!(
                email = account_email,
                error = %e,
                "failed to write lockout audit event; block remains in effect"
            );
        }
    }

    /// Record a data change event (insert/update/delete)
    pub async fn record_change(
        &self,
        action: AuditAction,
        resource: &str,
        actor_email: Option<&str>,
        before_state: Option<serde_json::Value>,
        after_state: Option<serde_json::Value>,
    ) {
        let mut event = AuditEvent::new(action, resource);
        if let Some(actor) = actor_email {
            event = event.with_actor(actor);
        }
        if let Some(before) = before_state {
            event = event.with_before_state(before);
        }
        if let Some(after) = after_state {
            event = event.with_after_state(after);
        }

        self.write_event(event).await;
    }

    /// Get the most recent audit events
    pub async fn recent_events(&self, limit: usize) -> DomainResult<Vec<AuditEvent>> {
        self.repository.find_recent(limit).await
    }

    /// Get recent audit events for a resource
    pub async fn events_for_resource(
        &self,
        resource: &str,
        limit: usize,
    ) -> DomainResult<Vec<AuditEvent>> {
        self.repository.find_by_resource(resource, limit).await
    }

    /// Internal write path for ordinary change events.
    ///
    /// With async_writes enabled the append happens in a background task;
    /// either way, failures are logged and swallowed.
    async fn write_event(&self, event: AuditEvent) {
        if self.config.async_writes {
            let repository = Arc::clone(&self.repository);
            task::spawn(async move {
                if let Err(e) = repository.append(&event).await {
                    warn!(error = %e, "failed to write audit event");
                }
            });
        } else if let Err(e) = self.repository.append(&event).await {
            warn!(error = %e, "failed to write audit event");
        }
    }
}
