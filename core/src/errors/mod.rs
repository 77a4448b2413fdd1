//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AccessError, PasswordError};

use thiserror::Error;

/// Core domain errors (general purpose)
///
/// Infrastructure failures here always fail closed: a storage or provider
/// error denies the sensitive operation rather than assuming success.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Storage unavailable: {message}")]
    Storage { message: String },

    #[error("Identity provider unavailable: {message}")]
    Provider { message: String },

    #[error("Email delivery failed: {message}")]
    EmailDelivery { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

pub type DomainResult<T> = Result<T, DomainError>;
