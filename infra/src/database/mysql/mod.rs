//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of the repository traits
//! using SQLx for database operations.

pub mod account_repository_impl;
pub mod audit_repository_impl;

// Re-export the MySQL implementations
pub use account_repository_impl::MySqlAccountRepository;
pub use audit_repository_impl::MySqlAuditEventRepository;
