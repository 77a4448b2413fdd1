//! No-op implementation of AuditEventRepository for when auditing is not needed

use async_trait::async_trait;

use super::AuditEventRepository;
use crate::domain::entities::audit::{AuditAction, AuditEvent};
use crate::errors::DomainError;

/// No-op implementation of AuditEventRepository
///
/// Accepts every append and returns empty results. Used in tests and in
/// tools that run the services without an audit store.
pub struct NoOpAuditEventRepository;

impl NoOpAuditEventRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpAuditEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditEventRepository for NoOpAuditEventRepository {
    async fn append(&self, _event: &AuditEvent) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find_recent(&self, _limit: usize) -> Result<Vec<AuditEvent>, DomainError> {
        Ok(Vec::new())
    }

    async fn find_by_resource(
        &self,
        _resource: &str,
        _limit: usize,
    ) -> Result<Vec<AuditEvent>, DomainError> {
        Ok(Vec::new())
    }

    async fn count_by_action(&self, _action: AuditAction) -> Result<u64, DomainError> {
        Ok(0)
    }
}
