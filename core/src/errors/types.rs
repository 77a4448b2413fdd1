//! Domain-specific error types for access control operations
//!
//! Error type definitions for credential verification, password rotation,
//! and privileged administration. Error messages are localized in the
//! presentation layer; these messages are the English defaults.

use thiserror::Error;

/// Access-control errors
///
/// These errors represent authentication and authorization failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AccessError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account blocked")]
    AccountBlocked,

    #[error("First access rotation pending")]
    FirstAccessPending,

    #[error("Operation requires the master administrator role")]
    Forbidden,

    #[error("Account not found")]
    AccountNotFound,
}

/// Password-handling errors
///
/// These errors represent recoverable password validation failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password does not meet the policy requirements")]
    WeakPassword,

    #[error("Password confirmation does not match")]
    Mismatch,
}
