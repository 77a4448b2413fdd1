//! Application factory
//!
//! Builds the Actix-web application with middleware and the full route
//! table, generic over the repository and collaborator implementations.

use actix_web::{body::MessageBody, middleware::Logger, web, App, HttpResponse};

use crate::middleware::{create_cors, SecurityMiddleware, SessionAuth};
use crate::routes::admin::{accounts, audit, block, invite, reset, set_password};
use crate::routes::auth::{first_access, forgot_password, login};
use crate::routes::AppState;

use fd_core::repositories::{AccountRepository, AuditEventRepository};
use fd_core::services::email::EmailSenderTrait;
use fd_core::services::identity::IdentityProviderTrait;
use fd_shared::types::response::HealthResponse;

/// Create and configure the application with all dependencies
pub fn create_app<A, P, M, E>(
    app_state: web::Data<AppState<A, P, M, E>>,
    jwt_secret: String,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    P: IdentityProviderTrait + 'static,
    M: EmailSenderTrait + 'static,
    E: AuditEventRepository + 'static,
{
    let cors = create_cors();
    let security = SecurityMiddleware::new();

    App::new()
        // Add application state
        .app_data(app_state)
        // Add middleware (order matters: security first, then CORS, then logging)
        .wrap(Logger::default())
        .wrap(cors)
        .wrap(security)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                // Public auth routes
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(login::login::<A, P, M, E>))
                        .route(
                            "/forgot-password",
                            web::post().to(forgot_password::forgot_password::<A, P, M, E>),
                        )
                        .route(
                            "/first-access",
                            web::post()
                                .to(first_access::first_access::<A, P, M, E>)
                                .wrap(SessionAuth::new(jwt_secret.clone())),
                        ),
                )
                // Privileged admin routes, all behind session authentication
                .service(
                    web::scope("/admin")
                        .wrap(SessionAuth::new(jwt_secret))
                        .route("/accounts", web::post().to(invite::invite::<A, P, M, E>))
                        .route("/accounts/me", web::get().to(accounts::me::<A, P, M, E>))
                        .route("/audit", web::get().to(audit::list_events::<A, P, M, E>))
                        .route(
                            "/accounts/{id}/profile",
                            web::put().to(accounts::update_profile::<A, P, M, E>),
                        )
                        .route(
                            "/accounts/{id}/reset",
                            web::post().to(reset::admin_reset::<A, P, M, E>),
                        )
                        .route(
                            "/accounts/{id}/password",
                            web::post().to(set_password::admin_set_password::<A, P, M, E>),
                        )
                        .route(
                            "/accounts/{id}/block",
                            web::post().to(block::block::<A, P, M, E>),
                        )
                        .route(
                            "/accounts/{id}/unblock",
                            web::post().to(block::unblock::<A, P, M, E>),
                        )
                        .route(
                            "/accounts/{id}",
                            web::delete().to(accounts::delete::<A, P, M, E>),
                        ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "findesk-api",
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
