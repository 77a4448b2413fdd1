//! Layered configuration loading for the API binary.
//!
//! Sources, later ones winning: `config/default.toml`, the
//! environment-specific `config/<env>.toml`, then `FD__*` environment
//! variables. Falls back to plain environment-variable loading when no
//! config files are present.

use fd_shared::config::AppConfig;

/// Load the application configuration
pub fn load() -> AppConfig {
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{environment}")).required(false))
        .add_source(config::Environment::with_prefix("FD").separator("__"));

    match builder
        .build()
        .and_then(|settings| settings.try_deserialize::<AppConfig>())
    {
        Ok(app_config) => app_config,
        Err(e) => {
            log::debug!("no layered config found ({e}); using environment variables");
            AppConfig::from_env()
        }
    }
}
