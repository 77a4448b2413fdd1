//! Transactional email configuration

use serde::{Deserialize, Serialize};

/// Transactional email sender configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Email provider ("http", "mock")
    pub provider: String,

    /// Base URL of the transactional email HTTP API
    pub api_url: String,

    /// API key for the email provider
    pub api_key: String,

    /// From address for outgoing mail
    pub from_address: String,

    /// Display name for the From header
    pub from_name: String,

    /// Maximum retry attempts for failed sends
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            api_url: String::new(),
            api_key: String::new(),
            from_address: "no-reply@findesk.app".to_string(),
            from_name: "FinDesk".to_string(),
            max_retries: default_max_retries(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            api_url: std::env::var("EMAIL_API_URL").unwrap_or_default(),
            api_key: std::env::var("EMAIL_API_KEY").unwrap_or_default(),
            from_address: std::env::var("EMAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "no-reply@findesk.app".to_string()),
            from_name: std::env::var("EMAIL_FROM_NAME")
                .unwrap_or_else(|_| "FinDesk".to_string()),
            max_retries: std::env::var("EMAIL_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_retries),
            request_timeout_secs: std::env::var("EMAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_request_timeout() -> u64 {
    30
}
