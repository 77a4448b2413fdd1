//! Access policy configuration
//!
//! The lockout threshold and the password policy are defined here once and
//! consumed by every component that needs them. The observed product policy
//! is 3 failed attempts and an 8-character minimum; both are configuration
//! values, not literals scattered through the code.

use serde::{Deserialize, Serialize};

/// Default number of consecutive failed logins before an account is blocked
pub const DEFAULT_MAX_FAILED_ATTEMPTS: u32 = 3;

/// Default minimum password length
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Access policy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccessPolicyConfig {
    /// Consecutive failed logins that trip the lockout
    pub max_failed_attempts: u32,

    /// Minimum password length
    pub min_password_length: usize,

    /// Require at least one uppercase letter
    pub require_uppercase: bool,

    /// Require at least one digit
    pub require_digit: bool,

    /// Require at least one special character
    pub require_special: bool,

    /// Length of generated temporary credentials
    pub temp_password_length: usize,
}

impl Default for AccessPolicyConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            require_uppercase: true,
            require_digit: true,
            require_special: true,
            temp_password_length: 12,
        }
    }
}

impl AccessPolicyConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let max_failed_attempts = std::env::var("ACCESS_MAX_FAILED_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_FAILED_ATTEMPTS);
        let min_password_length = std::env::var("ACCESS_MIN_PASSWORD_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MIN_PASSWORD_LENGTH);

        Self {
            max_failed_attempts,
            min_password_length,
            ..Default::default()
        }
    }

    /// Set the lockout threshold
    pub fn with_max_failed_attempts(mut self, max: u32) -> Self {
        self.max_failed_attempts = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = AccessPolicyConfig::default();
        assert_eq!(policy.max_failed_attempts, 3);
        assert_eq!(policy.min_password_length, 8);
        assert!(policy.require_uppercase);
        assert!(policy.require_digit);
        assert!(policy.require_special);
    }

    #[test]
    fn test_with_max_failed_attempts() {
        let policy = AccessPolicyConfig::default().with_max_failed_attempts(5);
        assert_eq!(policy.max_failed_attempts, 5);
    }
}
