//! Configuration for the access services

use fd_shared::config::AccessPolicyConfig;

/// Configuration for the access services
#[derive(Debug, Clone)]
pub struct AccessServiceConfig {
    /// Lockout threshold and password policy
    pub policy: AccessPolicyConfig,
    /// Token lifetime reported to callers when the provider omits one
    pub default_session_ttl_secs: i64,
}

impl Default for AccessServiceConfig {
    fn default() -> Self {
        Self {
            policy: AccessPolicyConfig::default(),
            default_session_ttl_secs: 3600,
        }
    }
}

impl AccessServiceConfig {
    /// Build from the shared policy configuration
    pub fn with_policy(policy: AccessPolicyConfig) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Lockout threshold shortcut
    pub fn max_failed_attempts(&self) -> u32 {
        self.policy.max_failed_attempts
    }
}
