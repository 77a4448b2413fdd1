//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `access_policy` - Lockout threshold and password policy
//! - `database` - Database connection and pool configuration
//! - `email` - Transactional email sender configuration
//! - `environment` - Environment detection and logging configuration
//! - `identity` - Identity provider endpoint and credentials
//! - `server` - HTTP server and CORS configuration

pub mod access_policy;
pub mod database;
pub mod email;
pub mod environment;
pub mod identity;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use access_policy::AccessPolicyConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use environment::{Environment, LoggingConfig};
pub use identity::IdentityConfig;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Access policy (lockout threshold, password rules)
    pub access_policy: AccessPolicyConfig,

    /// Identity provider configuration
    pub identity: IdentityConfig,

    /// Transactional email configuration
    pub email: EmailConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            access_policy: AccessPolicyConfig::default(),
            identity: IdentityConfig::default(),
            email: EmailConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        Self {
            environment: env,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            access_policy: AccessPolicyConfig::from_env(),
            identity: IdentityConfig::from_env(),
            email: EmailConfig::from_env(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}
