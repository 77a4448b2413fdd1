use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::admin::{AccountResponse, UpdateProfileRequest};
use crate::dto::auth::MessageResponse;
use crate::handlers::error::{
    handle_domain_error, language_from_request, validation_error_response,
};
use crate::middleware::AuthContext;
use crate::routes::{load_caller, AppState};

use fd_core::repositories::{AccountRepository, AuditEventRepository};
use fd_core::services::email::EmailSenderTrait;
use fd_core::services::identity::IdentityProviderTrait;
use fd_shared::types::Language;

use super::require_normal_session;

/// Handler for GET /api/v1/admin/accounts/me
///
/// Returns the caller's own account record. Available to every
/// authenticated session, including first-access-pending ones (the
/// dashboard needs it to decide whether to show the rotation screen).
pub async fn me<A, P, M, E>(
    _req: HttpRequest,
    context: AuthContext,
    state: web::Data<AppState<A, P, M, E>>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    P: IdentityProviderTrait + 'static,
    M: EmailSenderTrait + 'static,
    E: AuditEventRepository + 'static,
{
    match load_caller(state.account_repository.as_ref(), &context).await {
        Ok(caller) => HttpResponse::Ok().json(AccountResponse::from(caller)),
        Err(response) => response,
    }
}

/// Handler for PUT /api/v1/admin/accounts/{id}/profile
///
/// Updates the descriptive profile fields (display name, phone, job
/// title). Allowed for the account owner and for master administrators.
///
/// # Response
///
/// - 200 OK: the updated account
/// - 403 Forbidden: caller is neither the owner nor a master administrator
/// - 404 Not Found: unknown target account
pub async fn update_profile<A, P, M, E>(
    req: HttpRequest,
    context: AuthContext,
    state: web::Data<AppState<A, P, M, E>>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateProfileRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    P: IdentityProviderTrait + 'static,
    M: EmailSenderTrait + 'static,
    E: AuditEventRepository + 'static,
{
    let lang = language_from_request(&req);
    let target_id = path.into_inner();

    if let Err(errors) = request.validate() {
        return validation_error_response(errors, lang);
    }

    let caller = match load_caller(state.account_repository.as_ref(), &context).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    if let Err(response) = require_normal_session(&caller, lang) {
        return response;
    }

    match state
        .admin_service
        .update_profile(
            &caller,
            target_id,
            request.display_name.clone(),
            request.phone.clone(),
            request.job_title.clone(),
        )
        .await
    {
        Ok(account) => HttpResponse::Ok().json(AccountResponse::from(account)),
        Err(error) => handle_domain_error(error, lang),
    }
}

/// Handler for DELETE /api/v1/admin/accounts/{id}
///
/// Deletes the target account. Master administrator accounts can never be
/// deleted; such attempts are refused without mutation.
///
/// # Response
///
/// - 200 OK: account deleted
/// - 403 Forbidden: caller lacks the role, or the target is a master administrator
/// - 404 Not Found: unknown target account
pub async fn delete<A, P, M, E>(
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

    match state.admin_service.delete(&caller, target_id).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: match lang {
                Language::English => "Account deleted".to_string(),
                Language::Portuguese => "Conta excluída".to_string(),
            },
        }),
        Err(error) => handle_domain_error(error, lang),
    }
}
