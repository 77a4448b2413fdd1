//! Identity provider configuration
//!
//! The provider owns credential storage and session minting; the server
//! talks to it over HTTP and verifies its access tokens locally.

use serde::{Deserialize, Serialize};

/// Identity provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Base URL of the identity provider HTTP API
    pub base_url: String,

    /// Service-role key for privileged operations (password rotation, registration)
    pub service_key: String,

    /// Shared secret used to verify provider-issued access tokens (HS256)
    pub jwt_secret: String,

    /// Maximum retry attempts for transient provider failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9999".to_string(),
            service_key: String::new(),
            jwt_secret: String::from("change-me-in-production"),
            max_retries: default_max_retries(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl IdentityConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:9999".to_string()),
            service_key: std::env::var("IDENTITY_SERVICE_KEY").unwrap_or_default(),
            jwt_secret: std::env::var("IDENTITY_JWT_SECRET")
                .unwrap_or_else(|_| "change-me-in-production".to_string()),
            max_retries: std::env::var("IDENTITY_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_retries),
            request_timeout_secs: std::env::var("IDENTITY_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
        }
    }

    /// Check if the default JWT secret is still in use (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == "change-me-in-production"
    }
}

fn default_max_retries() -> u32 {
    2
}

fn default_request_timeout() -> u64 {
    15
}
