//! Mock implementation of AuditEventRepository for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::entities::audit::{AuditAction, AuditEvent};
use crate::errors::DomainError;

use super::AuditEventRepository;

/// In-memory mock of AuditEventRepository
pub struct MockAuditEventRepository {
    events: Arc<Mutex<Vec<AuditEvent>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockAuditEventRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Get all stored events for assertions
    pub fn get_all_events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Clear all events
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::Storage {
                message: "mock repository error".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockAuditEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditEventRepository for MockAuditEventRepository {
    async fn append(&self, event: &AuditEvent) -> Result<(), DomainError> {
        self.check_failure()?;
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<AuditEvent>, DomainError> {
        self.check_failure()?;
        let events = self.events.lock().unwrap();
        let mut result: Vec<AuditEvent> = events.iter().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result.truncate(limit);
        Ok(result)
    }

    async fn find_by_resource(
        &self,
        resource: &str,
        limit: usize,
    ) -> Result<Vec<AuditEvent>, DomainError> {
        self.check_failure()?;
        let events = self.events.lock().unwrap();
        let mut result: Vec<AuditEvent> = events
            .iter()
            .filter(|e| e.resource == resource)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result.truncate(limit);
        Ok(result)
    }

    async fn count_by_action(&self, action: AuditAction) -> Result<u64, DomainError> {
        self.check_failure()?;
        let events = self.events.lock().unwrap();
        Ok(events.iter().filter(|e| e.action == action).count() as u64)
    }
}
