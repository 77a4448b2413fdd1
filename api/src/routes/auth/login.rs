use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::{
    account_blocked_response, handle_domain_error, invalid_credentials_response,
    language_from_request, validation_error_response,
};
use crate::routes::AppState;

use fd_core::domain::value_objects::LoginOutcome;
use fd_core::repositories::{AccountRepository, AuditEventRepository};
use fd_core::services::email::EmailSenderTrait;
use fd_core::services::identity::IdentityProviderTrait;

/// Handler for POST /api/v1/auth/login
///
/// Verifies an email/password pair and returns a session on success.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "ana.silva@empresa.com",
///     "password": "Str0ng!Pass"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJhbGciOiJIUzI1NiIs...",
///     "expires_in": 3600,
///     "role": "USER",
///     "first_access_required": false
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: invalid email or password (attempt counts are never leaked)
/// - 403 Forbidden: the account is blocked; the message says who to contact
/// - 503 Service Unavailable: storage or identity provider outage (fail closed)
pub async fn login<A, P, M, E>(
    req: HttpRequest,
    state: web::Data<AppState<A, P, M, E>>,
    request: web::Json<LoginRequest>,
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
        .access_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(LoginOutcome::Success(session)) => HttpResponse::Ok().json(LoginResponse::from(session)),
        // The attempt that trips the lockout must say so plainly; earlier
        // failures stay generic and never leak the remaining attempts
        Ok(LoginOutcome::InvalidCredentials { lockout_tripped: true }) => {
            account_blocked_response(lang)
        }
        Ok(LoginOutcome::InvalidCredentials { lockout_tripped: false }) => {
            invalid_credentials_response(lang)
        }
        Ok(LoginOutcome::AccountBlocked) => account_blocked_response(lang),
        Err(error) => handle_domain_error(error, lang),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_login_request_validation() {
        let request = LoginRequest {
            email: "not-an-email".to_string(),
            password: "x".to_string(),
        };
        assert!(request.validate().is_err());

        let request = LoginRequest {
            email: "user@x.com".to_string(),
            password: "Str0ng!Pass".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[actix_rt::test]
    async fn test_login_rejects_empty_password() {
        let request = LoginRequest {
            email: "user@x.com".to_string(),
            password: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
