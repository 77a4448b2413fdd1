//! MySQL implementation of the AuditEventRepository trait.
//!
//! The audit_events table is append-only; this implementation issues only
//! INSERT and SELECT statements against it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use fd_core::domain::entities::audit::{AuditAction, AuditEvent};
use fd_core::errors::DomainError;
use fd_core::repositories::AuditEventRepository;

/// MySQL implementation of AuditEventRepository
pub struct MySqlAuditEventRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAuditEventRepository {
    /// Create a new MySQL audit event repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to AuditEvent entity
    fn row_to_event(row: &sqlx::mysql::MySqlRow) -> Result<AuditEvent, DomainError> {
        let id: String = row.try_get("id").map_err(storage_error)?;
        let action_str: String = row.try_get("action").map_err(storage_error)?;
        let action = AuditAction::from_str(&action_str).ok_or_else(|| DomainError::Storage {
            message: format!("Unknown audit action: {}", action_str),
        })?;

        let before_state: Option<serde_json::Value> =
            row.try_get("before_state").map_err(storage_error)?;
        let after_state: Option<serde_json::Value> =
            row.try_get("after_state").map_err(storage_error)?;

        Ok(AuditEvent {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Storage {
                message: format!("Invalid UUID: {}", e),
            })?,
            action,
            actor_email: row.try_get("actor_email").map_err(storage_error)?,
            resource: row.try_get("resource").map_err(storage_error)?,
            before_state,
            after_state,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(storage_error)?,
        })
    }
}

fn storage_error(e: sqlx::Error) -> DomainError {
    DomainError::Storage {
        message: format!("Database operation failed: {}", e),
    }
}

#[async_trait]
impl AuditEventRepository for MySqlAuditEventRepository {
    async fn append(&self, event: &AuditEvent) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO audit_events (
                id, action, actor_email, resource,
                before_state, after_state, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(event.id.to_string())
            .bind(event.action.as_str())
            .bind(&event.actor_email)
            .bind(&event.resource)
            .bind(&event.before_state)
            .bind(&event.after_state)
            .bind(event.created_at)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<AuditEvent>, DomainError> {
        let query = r#"
            SELECT id, action, actor_email, resource,
                   before_state, after_state, created_at
            FROM audit_events
            ORDER BY created_at DESC
            LIMIT ?
        "#;

        let rows = sqlx::query(query)
            .bind(limit as u32)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter().map(Self::row_to_event).collect()
    }

    async fn find_by_resource(
        &self,
        resource: &str,
        limit: usize,
    ) -> Result<Vec<AuditEvent>, DomainError> {
        let query = r#"
            SELECT id, action, actor_email, resource,
                   before_state, after_state, created_at
            FROM audit_events
            WHERE resource = ?
            ORDER BY created_at DESC
            LIMIT ?
        "#;

        let rows = sqlx::query(query)
            .bind(resource)
            .bind(limit as u32)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter().map(Self::row_to_event).collect()
    }

    async fn count_by_action(&self, action: AuditAction) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM audit_events WHERE action = ?")
            .bind(action.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        let total: i64 = row.try_get("total").map_err(storage_error)?;
        Ok(total as u64)
    }
}
