use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::admin::SetPasswordRequest;
use crate::dto::auth::MessageResponse;
use crate::handlers::error::{
    handle_domain_error, language_from_request, validation_error_response,
};
use crate::middleware::AuthContext;
use crate::routes::{load_caller, AppState};

use fd_core::domain::value_objects::AdminPasswordOutcome;
use fd_core::errors::{AccessError, DomainError};
use fd_core::repositories::{AccountRepository, AuditEventRepository};
use fd_core::services::email::EmailSenderTrait;
use fd_core::services::identity::IdentityProviderTrait;
use fd_shared::types::Language;

use super::require_normal_session;

/// Handler for POST /api/v1/admin/accounts/{id}/password
///
/// Sets a literal password chosen by the administrator, to be handed to the
/// user out-of-band. No email is sent; the first-access gate is still
/// re-armed. Master administrator only.
///
/// # Request Body
///
/// ```json
/// { "new_password": "Handed0ver!" }
/// ```
///
/// # Response
///
/// - 200 OK: password set
/// - 403 Forbidden: caller is not a master administrator
/// - 404 Not Found: unknown target account
pub async fn admin_set_password<A, P, M, E>(
    req: HttpRequest,
    context: AuthContext,
    state: web::Data<AppState<A, P, M, E>>,
    path: web::Path<Uuid>,
    request: web::Json<SetPasswordRequest>,
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
        .reset_service
        .admin_set_password(&caller, target_id, &request.new_password)
        .await
    {
        Ok(AdminPasswordOutcome::Completed) => HttpResponse::Ok().json(MessageResponse {
            message: match lang {
                Language::English => {
                    "Password set; the user must change it on first login".to_string()
                }
                Language::Portuguese => {
                    "Senha definida; o usuário deverá alterá-la no primeiro acesso".to_string()
                }
            },
        }),
        Ok(AdminPasswordOutcome::Forbidden) => {
            handle_domain_error(DomainError::Access(AccessError::Forbidden), lang)
        }
        Err(error) => handle_domain_error(error, lang),
    }
}
