//! MySQL implementation of the AccountRepository trait.
//!
//! Counter and block-flag transitions run inside a transaction holding a
//! row lock (`SELECT ... FOR UPDATE`), so two concurrent failed attempts
//! can never both read the same counter value: the read-modify-write is
//! performed by the storage layer, not by callers writing back stale state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use fd_core::domain::entities::account::{Account, AccountRole};
use fd_core::errors::DomainError;
use fd_core::repositories::{AccountRepository, FailedAttempt};

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(storage_error)?;
        let role_str: String = row.try_get("role").map_err(storage_error)?;
        let role = AccountRole::from_str(&role_str).ok_or_else(|| DomainError::Storage {
            message: format!("Unknown account role: {}", role_str),
        })?;
        let failed_attempts: u32 = row.try_get("failed_attempts").map_err(storage_error)?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Storage {
                message: format!("Invalid UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(storage_error)?,
            display_name: row.try_get("display_name").map_err(storage_error)?,
            phone: row.try_get("phone").map_err(storage_error)?,
            job_title: row.try_get("job_title").map_err(storage_error)?,
            role,
            failed_attempts,
            is_blocked: row.try_get("is_blocked").map_err(storage_error)?,
            first_access_required: row
                .try_get("first_access_required")
                .map_err(storage_error)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(storage_error)?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(storage_error)?,
            last_login_at: row.try_get("last_login_at").map_err(storage_error)?,
        })
    }
}

const ACCOUNT_COLUMNS: &str = r#"
    id, email, display_name, phone, job_title, role,
    failed_attempts, is_blocked, first_access_required,
    created_at, updated_at, last_login_at
"#;

fn storage_error(e: sqlx::Error) -> DomainError {
    DomainError::Storage {
        message: format!("Database operation failed: {}", e),
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = LOWER(?) LIMIT 1"
        );

        let result = sqlx::query(&query)
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        if self.exists_by_email(&account.email).await? {
            return Err(DomainError::Validation {
                message: "Email already registered".to_string(),
            });
        }

        let query = r#"
            INSERT INTO accounts (
                id, email, display_name, phone, job_title, role,
                failed_attempts, is_blocked, first_access_required,
                created_at, updated_at, last_login_at
            ) VALUES (?, LOWER(?), ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.display_name)
            .bind(&account.phone)
            .bind(&account.job_title)
            .bind(account.role.as_str())
            .bind(account.failed_attempts)
            .bind(account.is_blocked)
            .bind(account.first_access_required)
            .bind(account.created_at)
            .bind(account.updated_at)
            .bind(account.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE accounts SET
                display_name = ?,
                phone = ?,
                job_title = ?,
                role = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&account.display_name)
            .bind(&account.phone)
            .bind(&account.job_title)
            .bind(account.role.as_str())
            .bind(Utc::now())
            .bind(account.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "account".to_string(),
            });
        }

        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_failed_attempt(
        &self,
        id: Uuid,
        threshold: u32,
    ) -> Result<FailedAttempt, DomainError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        // Row lock: concurrent attempts serialize here
        let row = sqlx::query(
            "SELECT failed_attempts, is_blocked FROM accounts WHERE id = ? FOR UPDATE",
        )
        .bind(id.to_string())
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_error)?
        .ok_or_else(|| DomainError::NotFound {
            resource: "account".to_string(),
        })?;

        let current: u32 = row.try_get("failed_attempts").map_err(storage_error)?;
        let is_blocked: bool = row.try_get("is_blocked").map_err(storage_error)?;

        if is_blocked {
            tx.commit().await.map_err(storage_error)?;
            return Ok(FailedAttempt {
                attempts: current,
                just_blocked: false,
            });
        }

        let attempts = current + 1;
        let just_blocked = attempts >= threshold;

        sqlx::query(
            "UPDATE accounts SET failed_attempts = ?, is_blocked = ?, updated_at = ? WHERE id = ?",
        )
        .bind(attempts)
        .bind(just_blocked)
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(storage_error)?;

        tx.commit().await.map_err(storage_error)?;

        Ok(FailedAttempt {
            attempts,
            just_blocked,
        })
    }

    async fn reset_failed_attempts(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE accounts SET failed_attempts = 0, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }

    async fn set_blocked(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE accounts SET is_blocked = TRUE, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }

    async fn unblock(&self, id: Uuid) -> Result<(), DomainError> {
        // One statement: the flag and the counter always change together
        sqlx::query(
            "UPDATE accounts SET is_blocked = FALSE, failed_attempts = 0, updated_at = ? WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn set_first_access_required(
        &self,
        id: Uuid,
        required: bool,
    ) -> Result<(), DomainError> {
        sqlx::query("UPDATE accounts SET first_access_required = ?, updated_at = ? WHERE id = ?")
            .bind(required)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), DomainError> {
        let now = Utc::now();
        sqlx::query("UPDATE accounts SET last_login_at = ?, updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM accounts WHERE email = LOWER(?)")
            .bind(email.trim())
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        let total: i64 = row.try_get("total").map_err(storage_error)?;
        Ok(total > 0)
    }
}
