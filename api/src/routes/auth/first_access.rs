use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::auth::{FirstAccessRequest, MessageResponse};
use crate::handlers::error::{
    handle_domain_error, language_from_request, password_mismatch_response,
    validation_error_response, weak_password_response,
};
use crate::middleware::AuthContext;
use crate::routes::AppState;

use fd_core::domain::value_objects::RotationOutcome;
use fd_core::repositories::{AccountRepository, AuditEventRepository};
use fd_core::services::email::EmailSenderTrait;
use fd_core::services::identity::IdentityProviderTrait;
use fd_shared::types::Language;

/// Handler for POST /api/v1/auth/first-access
///
/// Completes the mandatory password rotation. This is the only operation a
/// session with `first_access_required` may perform; it is also safe to
/// call again after completion (the credential is simply re-rotated).
///
/// # Request Body
///
/// ```json
/// {
///     "new_password": "Str0ng!Pass",
///     "confirmation": "Str0ng!Pass"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "Password updated" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: the password fails the policy, or the confirmation differs
/// - 401 Unauthorized: missing or invalid session token
/// - 503 Service Unavailable: storage or identity provider outage
pub async fn first_access<A, P, M, E>(
    req: HttpRequest,
    context: AuthContext,
    state: web::Data<AppState<A, P, M, E>>,
    request: web::Json<FirstAccessRequest>,
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

    match state
        .first_access_gate
        .complete_rotation(context.account_id, &request.new_password, &request.confirmation)
        .await
    {
        Ok(RotationOutcome::Completed) => HttpResponse::Ok().json(MessageResponse {
            message: match lang {
                Language::English => "Password updated".to_string(),
                Language::Portuguese => "Senha atualizada".to_string(),
            },
        }),
        Ok(RotationOutcome::WeakPassword) => weak_password_response(lang),
        Ok(RotationOutcome::Mismatch) => password_mismatch_response(lang),
        Err(error) => handle_domain_error(error, lang),
    }
}
