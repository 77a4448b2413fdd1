//! Business services containing domain logic and use cases.

pub mod access;
pub mod admin;
pub mod audit;
pub mod email;
pub mod identity;
pub mod reset;

// Re-export commonly used types
pub use access::{
    AccessService, AccessServiceConfig, AttemptTracker, FirstAccessGate, PasswordPolicy,
};
pub use admin::{AccountInvite, AdminService};
pub use audit::{AuditService, AuditServiceConfig};
pub use email::{mask_email, EmailSenderTrait};
pub use identity::{IdentityProviderTrait, ProviderError, ProviderSession, TokenIdentity};
pub use reset::PasswordResetService;
