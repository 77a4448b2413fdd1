use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::auth::{ForgotPasswordRequest, MessageResponse};
use crate::handlers::error::{
    handle_domain_error, language_from_request, validation_error_response,
};
use crate::routes::AppState;

use fd_core::repositories::{AccountRepository, AuditEventRepository};
use fd_core::services::email::EmailSenderTrait;
use fd_core::services::identity::IdentityProviderTrait;
use fd_shared::types::Language;

/// Handler for POST /api/v1/auth/forgot-password
///
/// Requests a self-service password reset. The response is identical
/// whether or not the email is registered, so the endpoint cannot be used
/// to probe for accounts.
///
/// # Request Body
///
/// ```json
/// { "email": "ana.silva@empresa.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "If the email is registered, a temporary password has been sent" }
/// ```
///
/// ## Errors
/// - 502 Bad Gateway: the password was rotated but the email failed; the
///   credential must be delivered through another channel
/// - 503 Service Unavailable: storage or identity provider outage
pub async fn forgot_password<A, P, M, E>(
    req: HttpRequest,
    state: web::Data<AppState<A, P, M, E>>,
    request: web::Json<ForgotPasswordRequest>,
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

    match state.reset_service.request_self_reset(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: match lang {
                Language::English => {
                    "If the email is registered, a temporary password has been sent".to_string()
                }
                Language::Portuguese => {
                    "Se o e-mail estiver cadastrado, uma senha temporária foi enviada".to_string()
                }
            },
        }),
        Err(error) => handle_domain_error(error, lang),
    }
}
