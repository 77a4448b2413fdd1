//! Typed session object handed to callers after a successful login.
//!
//! Role and first-access status are copied from the Account row at login
//! time; the provider token is only a transient credential and is never
//! treated as the source of truth for authorization data.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::{Account, AccountRole};

/// Session granted to an authenticated account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSession {
    /// Identifier of the authenticated account
    pub account_id: Uuid,

    /// Email of the authenticated account
    pub email: String,

    /// Capability tier at the time of login
    pub role: AccountRole,

    /// Whether the session is restricted to the password rotation flow
    pub first_access_required: bool,

    /// Provider-issued access token
    pub access_token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

impl AccountSession {
    /// Assemble a session from the account row and the provider token
    pub fn for_account(account: &Account, access_token: impl Into<String>, expires_in: i64) -> Self {
        Self {
            account_id: account.id,
            email: account.email.clone(),
            role: account.role,
            first_access_required: account.first_access_required,
            access_token: access_token.into(),
            expires_in,
        }
    }

    /// Whether the session may be used for anything besides the rotation flow
    pub fn allows_normal_use(&self) -> bool {
        !self.first_access_required
    }
}
