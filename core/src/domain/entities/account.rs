//! Account entity representing a back-office user's identity record.
//!
//! The account is the single source of truth for role, block state, and the
//! first-access flag. The identity provider only stores the credential hash
//! and mints sessions; it is never consulted for authorization data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Capability tier of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountRole {
    /// The only role permitted to manage other accounts' credentials
    MasterAdmin,
    /// Elevated access to back-office data, no identity administration
    Admin,
    /// Regular back-office user
    User,
}

impl AccountRole {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MasterAdmin => "MASTER_ADMIN",
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }

    /// Parse from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "MASTER_ADMIN" => Some(Self::MasterAdmin),
            "ADMIN" => Some(Self::Admin),
            "USER" => Some(Self::User),
            _ => None,
        }
    }
}

/// Access state of an account, derived from its flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    /// Normal working account
    ActiveNormal,
    /// Must complete the mandatory password rotation before normal use
    ActiveFirstAccessPending,
    /// Refused by the verifier until explicitly unblocked
    Blocked,
}

/// Account entity for a registered back-office user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Email address, stored lowercase; lookups are case-insensitive
    pub email: String,

    /// Display name shown across the back-office
    pub display_name: String,

    /// Contact phone number
    pub phone: Option<String>,

    /// Job title within the company
    pub job_title: Option<String>,

    /// Capability tier
    pub role: AccountRole,

    /// Consecutive failed login attempts since the last success
    pub failed_attempts: u32,

    /// Whether the account is blocked from logging in
    pub is_blocked: bool,

    /// Whether the mandatory first-access password rotation is pending
    pub first_access_required: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the account's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Creates a new Account, as produced by the invite flow.
    ///
    /// New accounts always start with the first-access rotation pending.
    pub fn new(email: impl Into<String>, display_name: impl Into<String>, role: AccountRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into().trim().to_lowercase(),
            display_name: display_name.into(),
            phone: None,
            job_title: None,
            role,
            failed_attempts: 0,
            is_blocked: false,
            first_access_required: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Derive the access state from the block and first-access flags
    pub fn access_state(&self) -> AccessState {
        if self.is_blocked {
            AccessState::Blocked
        } else if self.first_access_required {
            AccessState::ActiveFirstAccessPending
        } else {
            AccessState::ActiveNormal
        }
    }

    /// Checks if this account holds the master administrator role
    pub fn is_master_admin(&self) -> bool {
        self.role == AccountRole::MasterAdmin
    }

    /// Records a failed login attempt, blocking the account when the
    /// threshold is reached. Master administrators are exempt. Returns
    /// whether this call caused the transition into the blocked state.
    pub fn register_failure(&mut self, threshold: u32) -> bool {
        if self.is_blocked || self.is_master_admin() {
            return false;
        }
        self.failed_attempts += 1;
        self.updated_at = Utc::now();
        if self.failed_attempts >= threshold {
            self.is_blocked = true;
            return true;
        }
        false
    }

    /// Resets the failed attempt counter after a successful verification
    pub fn register_success(&mut self) {
        self.failed_attempts = 0;
        self.updated_at = Utc::now();
    }

    /// Blocks the account
    pub fn block(&mut self) {
        self.is_blocked = true;
        self.updated_at = Utc::now();
    }

    /// Unblocks the account and clears the failed attempt counter
    pub fn unblock(&mut self) {
        self.is_blocked = false;
        self.failed_attempts = 0;
        self.updated_at = Utc::now();
    }

    /// Re-arms the first-access gate, as done by any password reset
    pub fn require_first_access(&mut self) {
        self.first_access_required = true;
        self.updated_at = Utc::now();
    }

    /// Marks the mandatory rotation as completed
    pub fn complete_first_access(&mut self) {
        self.first_access_required = false;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}
