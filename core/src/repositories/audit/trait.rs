//! Audit event repository trait defining the interface for audit persistence.
//!
//! The store is append-only: there are no update or delete operations, by
//! contract. Implementations should keep writes cheap so they never slow
//! down the authentication flow they document.

use async_trait::async_trait;

use crate::domain::entities::audit::{AuditAction, AuditEvent};
use crate::errors::DomainError;

/// Repository trait for append-only AuditEvent persistence
#[async_trait]
pub trait AuditEventRepository: Send + Sync {
    /// Append a new audit event
    ///
    /// # Returns
    /// * `Ok(())` on successful append
    /// * `Err(DomainError)` if the write fails
    async fn append(&self, event: &AuditEvent) -> Result<(), DomainError>;

    /// Find the most recent events, newest first
    async fn find_recent(&self, limit: usize) -> Result<Vec<AuditEvent>, DomainError>;

    /// Find events for a resource, newest first
    async fn find_by_resource(
        &self,
        resource: &str,
        limit: usize,
    ) -> Result<Vec<AuditEvent>, DomainError>;

    /// Count stored events of a given action kind
    async fn count_by_action(&self, action: AuditAction) -> Result<u64, DomainError>;
}
