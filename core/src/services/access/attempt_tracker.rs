//! Attempt tracker: per-account failure counting and the lockout trip.
//!
//! All counter math is delegated to the repository as atomic conditional
//! updates; this service decides policy (threshold, master-admin exemption)
//! and signals the audit trail when an account transitions into blocked.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::account::Account;
use crate::errors::DomainResult;
use crate::repositories::{AccountRepository, AuditEventRepository, FailedAttempt};
use crate::services::audit::AuditService;

use super::config::AccessServiceConfig;

/// Reason recorded on the lockout audit event
const LOCKOUT_REASON: &str = "too many failed login attempts";

/// Tracks failed login attempts and trips the lockout threshold
pub struct AttemptTracker<A, E>
where
    A: AccountRepository,
    E: AuditEventRepository,
{
    account_repository: Arc<A>,
    audit_service: Arc<AuditService<E>>,
    config: AccessServiceConfig,
}

impl<A, E> AttemptTracker<A, E>
where
    A: AccountRepository,
    E: AuditEventRepository + 'static,
{
    /// Create a new attempt tracker
    pub fn new(
        account_repository: Arc<A>,
        audit_service: Arc<AuditService<E>>,
        config: AccessServiceConfig,
    ) -> Self {
        Self {
            account_repository,
            audit_service,
            config,
        }
    }

    /// Record a failed verification for an account.
    ///
    /// Master administrators are exempt: their counter never moves and they
    /// can never be blocked. For everyone else the repository applies the
    /// increment and the threshold check in one atomic update; when this
    /// call is the one that crosses the threshold, exactly one lockout
    /// audit event is written before returning.
    pub async fn record_failure(&self, account: &Account) -> DomainResult<FailedAttempt> {
        if account.is_master_admin() {
            info!(
                account_id = %account.id,
                "failed login on master administrator account; lockout exempt"
            );
            return Ok(FailedAttempt {
                attempts: account.failed_attempts,
                just_blocked: false,
            });
        }

        let record = self
            .account_repository
            .record_failed_attempt(account.id, self.config.max_failed_attempts())
            .await?;

        if record.just_blocked {
            warn!(
                account_id = %account.id,
                attempts = record.attempts,
                "account blocked after repeated failed logins"
            );
            self.audit_service
                .record_lockout(&account.email, LOCKOUT_REASON)
                .await;
        } else {
            info!(
                account_id = %account.id,
                attempts = record.attempts,
                "failed login attempt recorded"
            );
        }

        Ok(record)
    }

    /// Record a successful verification: the counter resets to zero.
    ///
    /// Never touches the block flag; clearing a block is a privileged
    /// operation handled by the admin service.
    pub async fn record_success(&self, account: &Account) -> DomainResult<()> {
        self.account_repository
            .reset_failed_attempts(account.id)
            .await
    }
}
