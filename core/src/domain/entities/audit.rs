//! Audit event entity for recording identity and data changes.
//!
//! Events are append-only: the controller writes them and reads them back
//! for review screens, but never mutates or deletes a stored event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Kind of change recorded by an audit event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// A record was created
    Insert,
    /// A record was modified
    Update,
    /// A record was removed
    Delete,
    /// An account was blocked after repeated failed logins
    Lockout,
}

impl AuditAction {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Lockout => "LOCKOUT",
        }
    }

    /// Parse from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "INSERT" => Some(Self::Insert),
            "UPDATE" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            "LOCKOUT" => Some(Self::Lockout),
            _ => None,
        }
    }
}

/// Represents one append-only audit log entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEvent {
    /// Unique identifier for the event
    pub id: Uuid,

    /// Kind of change
    pub action: AuditAction,

    /// Email of the acting user (None for system-initiated events)
    pub actor_email: Option<String>,

    /// Name of the affected resource (e.g. "accounts")
    pub resource: String,

    /// State of the record before the change, as an opaque payload
    pub before_state: Option<JsonValue>,

    /// State of the record after the change, as an opaque payload
    pub after_state: Option<JsonValue>,

    /// Timestamp when the event occurred
    pub created_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Create a new audit event
    pub fn new(action: AuditAction, resource: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
            actor_email: None,
            resource: resource.into(),
            before_state: None,
            after_state: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the acting user's email
    pub fn with_actor(mut self, actor_email: impl Into<String>) -> Self {
        self.actor_email = Some(actor_email.into());
        self
    }

    /// Attach the before-change payload
    pub fn with_before_state(mut self, state: JsonValue) -> Self {
        self.before_state = Some(state);
        self
    }

    /// Attach the after-change payload
    pub fn with_after_state(mut self, state: JsonValue) -> Self {
        self.after_state = Some(state);
        self
    }

    /// Build the lockout event written when an account is blocked
    pub fn lockout(account_email: &str, reason: &str) -> Self {
        Self::new(AuditAction::Lockout, "accounts").with_after_state(serde_json::json!({
            "email": account_email,
            "reason": reason,
        }))
    }
}
