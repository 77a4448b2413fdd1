//! Mock implementation of AccountRepository for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

use super::r#trait::{AccountRepository, FailedAttempt};

/// In-memory mock of AccountRepository
pub struct MockAccountRepository {
    pub accounts: Arc<Mutex<Vec<Account>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockAccountRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Create a mock repository seeded with an account
    pub fn with_existing_account(account: Account) -> Self {
        let repo = Self::new();
        repo.accounts.lock().unwrap().push(account);
        repo
    }

    /// Add another account to the store
    pub fn push(&self, account: Account) {
        self.accounts.lock().unwrap().push(account);
    }

    /// Make every operation fail with a storage error
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Fetch a snapshot of an account for assertions
    pub fn get(&self, id: Uuid) -> Option<Account> {
        self.accounts.lock().unwrap().iter().find(|a| a.id == id).cloned()
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

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.check_failure()?;
        let needle = email.trim().to_lowercase();
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.email == needle).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.check_failure()?;
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        self.check_failure()?;
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(DomainError::Validation {
                message: "email already registered".to_string(),
            });
        }
        accounts.push(account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        self.check_failure()?;
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(existing) = accounts.iter_mut().find(|a| a.id == account.id) {
            *existing = account.clone();
            Ok(account)
        } else {
            Err(DomainError::NotFound {
                resource: "account".to_string(),
            })
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(index) = accounts.iter().position(|a| a.id == id) {
            accounts.remove(index);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn record_failed_attempt(
        &self,
        id: Uuid,
        threshold: u32,
    ) -> Result<FailedAttempt, DomainError> {
        self.check_failure()?;
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DomainError::NotFound {
                resource: "account".to_string(),
            })?;

        let just_blocked = account.register_failure(threshold);
        Ok(FailedAttempt {
            attempts: account.failed_attempts,
            just_blocked,
        })
    }

    async fn reset_failed_attempts(&self, id: Uuid) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.iter_mut().find(|a| a.id == id) {
            account.register_success();
        }
        Ok(())
    }

    async fn set_blocked(&self, id: Uuid) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.iter_mut().find(|a| a.id == id) {
            account.block();
        }
        Ok(())
    }

    async fn unblock(&self, id: Uuid) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.iter_mut().find(|a| a.id == id) {
            account.unblock();
        }
        Ok(())
    }

    async fn set_first_access_required(
        &self,
        id: Uuid,
        required: bool,
    ) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.iter_mut().find(|a| a.id == id) {
            if required {
                account.require_first_access();
            } else {
                account.complete_first_access();
            }
        }
        Ok(())
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.iter_mut().find(|a| a.id == id) {
            account.update_last_login();
        }
        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.check_failure()?;
        let needle = email.trim().to_lowercase();
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().any(|a| a.email == needle))
    }
}
