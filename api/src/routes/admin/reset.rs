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

/// Handler for POST /api/v1/admin/accounts/{id}/reset
///
/// Rotates the target's credential to a generated temporary password,
/// re-arms the first-access gate, and emails the credential. Does not
/// unblock the account. Master administrator only.
///
/// # Response
///
/// - 200 OK: temporary password sent
/// - 403 Forbidden: caller is not a master administrator
/// - 404 Not Found: unknown target account
/// - 502 Bad Gateway: credential rotated but the email failed
pub async fn admin_reset<A, P, M, E>(
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

    match state.reset_service.admin_reset(&caller, target_id).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: match lang {
                Language::English => "Temporary password sent to the user".to_string(),
                Language::Portuguese => "Senha temporária enviada ao usuário".to_string(),
            },
        }),
        Err(error) => handle_domain_error(error, lang),
    }
}
