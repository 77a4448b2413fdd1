//! Repository interfaces for domain persistence.

pub mod account;
pub mod audit;

pub use account::{AccountRepository, FailedAttempt, MockAccountRepository};
pub use audit::{AuditEventRepository, MockAuditEventRepository, NoOpAuditEventRepository};
