use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::admin::{AccountResponse, InviteRequest};
use crate::handlers::error::{
    handle_domain_error, language_from_request, validation_error_response,
};
use crate::middleware::AuthContext;
use crate::routes::{load_caller, AppState};

use fd_core::domain::entities::account::AccountRole;
use fd_core::repositories::{AccountRepository, AuditEventRepository};
use fd_core::services::admin::AccountInvite;
use fd_core::services::email::EmailSenderTrait;
use fd_core::services::identity::IdentityProviderTrait;
use fd_shared::errors::{error_codes, ErrorResponse};

use super::require_normal_session;

/// Handler for POST /api/v1/admin/accounts
///
/// Invites a new account: creates the row with the first-access gate armed,
/// registers a generated temporary credential, and emails it to the user.
/// Master administrator only.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "novo@empresa.com",
///     "display_name": "Novo Usuário",
///     "phone": "+55 11 98888-7777",
///     "job_title": "Analista Financeiro",
///     "role": "USER"
/// }
/// ```
///
/// # Response
///
/// - 201 Created: the new account
/// - 400 Bad Request: invalid email/role or duplicate address
/// - 403 Forbidden: caller is not a master administrator
/// - 502 Bad Gateway: account created but the invite email failed
pub async fn invite<A, P, M, E>(
    req: HttpRequest,
    context: AuthContext,
    state: web::Data<AppState<A, P, M, E>>,
    request: web::Json<InviteRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    P: IdentityProviderTrait + 'static,
    M: EmailSenderTrait + 'static,
    E: AuditEventRepository + 'static,
{
    let lang = language_from_request(&req);

    if let Err(errors) = request.validate() {
        return validation_error_response(errors, lang);
    }

    let Some(role) = AccountRole::from_str(&request.role) else {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            error_codes::VALIDATION_ERROR,
            format!("Unknown role: {}", request.role),
        ));
    };

    let caller = match load_caller(state.account_repository.as_ref(), &context).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    if let Err(response) = require_normal_session(&caller, lang) {
        return response;
    }

    let invite = AccountInvite {
        email: request.email.clone(),
        display_name: request.display_name.clone(),
        phone: request.phone.clone(),
        job_title: request.job_title.clone(),
        role,
    };

    match state.admin_service.invite(&caller, invite).await {
        Ok(account) => HttpResponse::Created().json(AccountResponse::from(account)),
        Err(error) => handle_domain_error(error, lang),
    }
}
