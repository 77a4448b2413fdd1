//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the FinDesk backend,
//! following Clean Architecture principles. It provides concrete
//! implementations for the external collaborators the core consumes.
//!
//! ## Architecture
//!
//! - **Database**: MySQL repository implementations using SQLx
//! - **Identity**: HTTP client for the external identity provider
//! - **Email**: Transactional email HTTP client and a development mock
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Identity provider module - HTTP client for the external provider
pub mod identity;

/// Email module - transactional email senders
pub mod email;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Identity provider error
    #[error("Identity provider error: {0}")]
    Identity(String),

    /// Email service error
    #[error("Email service error: {0}")]
    Email(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
