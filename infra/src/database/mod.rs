//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - Repository pattern implementations

pub mod mysql;

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool,
};
use log::LevelFilter;
use std::str::FromStr;
use std::time::Duration;

use fd_shared::config::DatabaseConfig;

use crate::InfrastructureError;

// Re-export commonly used types
pub use mysql::{MySqlAccountRepository, MySqlAuditEventRepository};

/// Create a MySQL connection pool from configuration
///
/// # Arguments
/// * `config` - Database configuration settings
///
/// # Returns
/// * `Result<MySqlPool, InfrastructureError>` - Connection pool or error
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, InfrastructureError> {
    tracing::info!(
        max_connections = config.max_connections,
        "creating database connection pool"
    );

    let mut connect_options = MySqlConnectOptions::from_str(&config.url)
        .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

    connect_options = connect_options
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_secs(1));

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .max_lifetime(Duration::from_secs(config.max_lifetime))
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await?;

    Ok(pool)
}
