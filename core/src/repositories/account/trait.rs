//! Account repository trait defining the interface for account persistence.
//!
//! The counter and block-flag operations are contracted to be atomic: the
//! storage layer performs the read-modify-write under a row lock so two
//! concurrent failed attempts can never both observe the same counter value
//! and lose one of the failure events.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Result of atomically recording a failed login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailedAttempt {
    /// Failed attempt counter after the increment
    pub attempts: u32,
    /// Whether this call caused the transition into the blocked state
    pub just_blocked: bool,
}

/// Repository trait for Account entity persistence operations
///
/// Implementations handle the actual database operations while maintaining
/// the abstraction boundary between domain and infrastructure layers.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by email (case-insensitive)
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account registered under the email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Create a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate email)
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Update an existing account's mutable fields
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Delete an account
    ///
    /// # Returns
    /// * `Ok(true)` - Account was deleted
    /// * `Ok(false)` - Account not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Atomically record a failed login attempt.
    ///
    /// Increments `failed_attempts` and, when the new value reaches
    /// `threshold`, sets `is_blocked` in the same update. Accounts that are
    /// already blocked are left untouched and report no transition.
    async fn record_failed_attempt(
        &self,
        id: Uuid,
        threshold: u32,
    ) -> Result<FailedAttempt, DomainError>;

    /// Atomically reset the failed attempt counter to zero.
    ///
    /// Never touches the block flag; clearing a block is a distinct,
    /// privileged operation.
    async fn reset_failed_attempts(&self, id: Uuid) -> Result<(), DomainError>;

    /// Block an account
    async fn set_blocked(&self, id: Uuid) -> Result<(), DomainError>;

    /// Unblock an account, clearing the failed attempt counter in the same
    /// update. A no-op block-wise on an already-unblocked account, but the
    /// counter is still zeroed.
    async fn unblock(&self, id: Uuid) -> Result<(), DomainError>;

    /// Set or clear the first-access flag
    async fn set_first_access_required(
        &self,
        id: Uuid,
        required: bool,
    ) -> Result<(), DomainError>;

    /// Update the last-login timestamp to now
    async fn touch_last_login(&self, id: Uuid) -> Result<(), DomainError>;

    /// Check whether an account exists with the given email (case-insensitive)
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
}
