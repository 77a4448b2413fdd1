use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::dto::auth::MessageResponse;
use crate::handlers::error::{handle_domain_error, language_from_request};
use crate::middleware::AuthContext;
use crate::routes::{load_caller, AppState};

use fd_core::repositories::{AccountRepository, AuditEventRepository};
use fd_core::services::email::EmailSenderTrait;
use fd_core::services::identity::IdentityProviderTrait;
use fd_shared::types::Language;

use super::require_normal_session;

/// Handler for POST /api/v1/admin/accounts/{id}/block
///
/// Blocks the target account. Master administrator accounts can never be
/// blocked; such attempts are refused without mutation.
///
/// # Response
///
/// - 200 OK: account blocked
/// - 403 Forbidden: caller lacks the role, or the target is a master administrator
/// - 404 Not Found: unknown target account
pub async fn block<A, P, M, E>(
    req: HttpRequest,
    context: AuthContext,
    state: web::Data<AppState<A, P, M, E>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    P: IdentityProviderTrait + 'static,
    M: EmailSenderTrait + 'static,
    E: AuditEventRepository + 'static,
{
    let lang = language_from_request(&req);
    let target_id = path.into_inner();

    let caller = match load_caller(state.account_repository.as_ref(), &context).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    if let Err(response) = require_normal_session(&caller, lang) {
        return response;
    }

    match state.admin_service.block(&caller, target_id).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: match lang {
                Language::English => "Account blocked".to_string(),
                Language::Portuguese => "Conta bloqueada".to_string(),
            },
        }),
        Err(error) => handle_domain_error(error, lang),
    }
}

/// Handler for POST /api/v1/admin/accounts/{id}/unblock
///
/// Unblocks the target account and clears its failed-attempt counter.
/// Idempotent: unblocking an active account still zeroes the counter.
///
/// # Response
///
/// - 200 OK: account unblocked
/// - 403 Forbidden: caller is not a master administrator
/// - 404 Not Found: unknown target account
pub async fn unblock<A, P, M, E>(
    req: HttpRequest,
    context: AuthContext,
    state: web::Data<AppState<A, P, M, E>>,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    P: IdentityProviderTrait + 'static,
    M: EmailSenderTrait + 'static,
    E: AuditEventRepository + 'static,
{
    let lang = language_from_request(&req);
    let target_id = path.into_inner();

    let caller = match load_caller(state.account_repository.as_ref(), &context).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    if let Err(response) = require_normal_session(&caller, lang) {
        return response;
    }

    match state.admin_service.unblock(&caller, target_id).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: match lang {
                Language::English => "Account unblocked".to_string(),
                Language::Portuguese => "Conta desbloqueada".to_string(),
            },
        }),
        Err(error) => handle_domain_error(error, lang),
    }
}
