//! Typed operation outcomes returned by the access services.
//!
//! Callers branch on these exhaustively instead of string-matching error
//! messages. Recoverable, user-facing results live here; infrastructure
//! failures are reported through `DomainError` instead.

use serde::{Deserialize, Serialize};

use crate::domain::entities::session::AccountSession;

/// Result of a credential verification attempt
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// Credentials verified; carries the issued session
    Success(AccountSession),
    /// Wrong email or password. `lockout_tripped` is true exactly when this
    /// failure was the one that blocked the account, so the surface can say
    /// so instead of the generic message; earlier failures never reveal how
    /// many attempts remain.
    InvalidCredentials { lockout_tripped: bool },
    /// The account is blocked; no password comparison was performed
    AccountBlocked,
}

impl LoginOutcome {
    /// Whether the attempt produced a usable session
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Invalid-credentials outcome that did not trip the lockout
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials {
            lockout_tripped: false,
        }
    }
}

/// Result of the mandatory first-access password rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RotationOutcome {
    /// The credential was rotated and the first-access flag cleared
    Completed,
    /// The candidate password fails the password policy; nothing changed
    WeakPassword,
    /// The confirmation does not match the new password; nothing changed
    Mismatch,
}

/// Result of an administrator setting a literal password
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminPasswordOutcome {
    /// The credential was set and the first-access gate re-armed
    Completed,
    /// The caller lacks the master administrator role; nothing changed
    Forbidden,
}
