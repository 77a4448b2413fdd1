use actix_web::{web, HttpServer};
use log::{info, warn};
use std::sync::Arc;

mod app;
mod config;
mod dto;
mod handlers;
mod middleware;
mod routes;

use fd_core::services::access::{
    AccessService, AccessServiceConfig, AttemptTracker, FirstAccessGate, PasswordPolicy,
};
use fd_core::services::admin::AdminService;
use fd_core::services::audit::AuditService;
use fd_core::services::email::EmailSenderTrait;
use fd_core::services::reset::PasswordResetService;
use fd_infra::database::{create_pool, MySqlAccountRepository, MySqlAuditEventRepository};
use fd_infra::email::{HttpEmailSender, MockEmailSender};
use fd_infra::identity::HttpIdentityProvider;
use fd_shared::config::AppConfig;

use routes::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting FinDesk API server");

    let app_config = config::load();

    if app_config.environment.is_production() && app_config.identity.is_using_default_secret() {
        warn!("IDENTITY_JWT_SECRET is still the default value; set it before going live");
    }

    let pool = create_pool(&app_config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let account_repository = Arc::new(MySqlAccountRepository::new(pool.clone()));
    let audit_repository = Arc::new(MySqlAuditEventRepository::new(pool));

    let identity_provider = Arc::new(
        HttpIdentityProvider::new(app_config.identity.clone())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?,
    );

    // The email sender is selected at startup; everything downstream is
    // generic over the trait
    match app_config.email.provider.as_str() {
        "http" => {
            let email_sender = Arc::new(
                HttpEmailSender::new(app_config.email.clone())
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?,
            );
            run_server(app_config, account_repository, audit_repository, identity_provider, email_sender)
                .await
        }
        other => {
            if other != "mock" {
                warn!(
                    "unknown email provider '{}'; falling back to the mock sender",
                    other
                );
            }
            let email_sender = Arc::new(MockEmailSender::new());
            run_server(app_config, account_repository, audit_repository, identity_provider, email_sender)
                .await
        }
    }
}

/// Wire the services and run the HTTP server
async fn run_server<M>(
    app_config: AppConfig,
    account_repository: Arc<MySqlAccountRepository>,
    audit_repository: Arc<MySqlAuditEventRepository>,
    identity_provider: Arc<HttpIdentityProvider>,
    email_sender: Arc<M>,
) -> std::io::Result<()>
where
    M: EmailSenderTrait + 'static,
{
    let audit_service = Arc::new(AuditService::with_defaults(audit_repository));

    let access_config = AccessServiceConfig::with_policy(app_config.access_policy.clone());
    let attempt_tracker = Arc::new(AttemptTracker::new(
        Arc::clone(&account_repository),
        Arc::clone(&audit_service),
        access_config.clone(),
    ));
    let access_service = Arc::new(AccessService::new(
        Arc::clone(&account_repository),
        Arc::clone(&identity_provider),
        attempt_tracker,
        access_config,
    ));
    let first_access_gate = Arc::new(FirstAccessGate::new(
        Arc::clone(&account_repository),
        Arc::clone(&identity_provider),
        PasswordPolicy::from_config(&app_config.access_policy),
    ));
    let reset_service = Arc::new(PasswordResetService::new(
        Arc::clone(&account_repository),
        Arc::clone(&identity_provider),
        Arc::clone(&email_sender),
        Arc::clone(&audit_service),
        app_config.access_policy.clone(),
    ));
    let admin_service = Arc::new(AdminService::new(
        Arc::clone(&account_repository),
        Arc::clone(&identity_provider),
        Arc::clone(&email_sender),
        Arc::clone(&audit_service),
        app_config.access_policy.clone(),
    ));

    let app_state = web::Data::new(AppState {
        access_service,
        first_access_gate,
        reset_service,
        admin_service,
        audit_service,
        account_repository,
    });

    let jwt_secret = app_config.identity.jwt_secret.clone();
    let bind_address = app_config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || app::create_app(app_state.clone(), jwt_secret.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
