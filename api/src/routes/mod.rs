//! HTTP route handlers.

pub mod admin;
pub mod auth;

use std::sync::Arc;

use actix_web::HttpResponse;

use fd_core::domain::entities::account::Account;
use fd_core::repositories::{AccountRepository, AuditEventRepository};
use fd_core::services::access::{AccessService, FirstAccessGate};
use fd_core::services::admin::AdminService;
use fd_core::services::audit::AuditService;
use fd_core::services::email::EmailSenderTrait;
use fd_core::services::identity::IdentityProviderTrait;
use fd_core::services::reset::PasswordResetService;
use fd_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::AuthContext;

/// Application state holding the shared services
pub struct AppState<A, P, M, E>
where
    A: AccountRepository,
    P: IdentityProviderTrait,
    M: EmailSenderTrait,
    E: AuditEventRepository,
{
    pub access_service: Arc<AccessService<A, P, E>>,
    pub first_access_gate: Arc<FirstAccessGate<A, P>>,
    pub reset_service: Arc<PasswordResetService<A, P, M, E>>,
    pub admin_service: Arc<AdminService<A, P, M, E>>,
    pub audit_service: Arc<AuditService<E>>,
    pub account_repository: Arc<A>,
}

/// Load the caller's account row for an authenticated request.
///
/// The account row, not the token, is the source of truth for role and
/// first-access status, so every privileged handler starts here.
pub async fn load_caller<A>(
    account_repository: &A,
    context: &AuthContext,
) -> Result<Account, HttpResponse>
where
    A: AccountRepository,
{
    match account_repository.find_by_id(context.account_id).await {
        Ok(Some(account)) => Ok(account),
        Ok(None) => Err(HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::UNAUTHORIZED,
            "Session does not match a registered account",
        ))),
        Err(e) => {
            log::error!("Failed to load caller account: {:?}", e);
            Err(HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::STORAGE_UNAVAILABLE,
                "The service is temporarily unavailable",
            )))
        }
    }
}
