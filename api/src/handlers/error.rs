//! Domain error to HTTP response mapping with language negotiation.
//!
//! Typed domain outcomes become specific HTTP responses so the dashboard
//! can branch on stable error codes. Messages are localized from the
//! Accept-Language header (English / Brazilian Portuguese).

use actix_web::{
    http::header,
    HttpRequest, HttpResponse,
};

use fd_core::errors::{AccessError, DomainError, PasswordError};
use fd_shared::errors::{error_codes, ErrorResponse};
use fd_shared::types::Language;

/// Detect language preference from the Accept-Language header
pub fn language_from_request(req: &HttpRequest) -> Language {
    let Some(header_value) = req.headers().get(header::ACCEPT_LANGUAGE) else {
        return Language::English;
    };
    let Ok(header_str) = header_value.to_str() else {
        return Language::English;
    };

    // Parse entries like "pt-BR,pt;q=0.9,en;q=0.8" and pick the highest
    // quality language we support
    let mut preferred = Language::English;
    let mut max_quality = 0.0_f32;

    for entry in header_str.split(',') {
        let mut parts = entry.trim().split(';');
        let tag = parts.next().unwrap_or_default().to_lowercase();
        let quality = parts
            .next()
            .and_then(|q| q.trim().strip_prefix("q=").map(str::to_string))
            .and_then(|q| q.parse::<f32>().ok())
            .unwrap_or(1.0);

        if tag.starts_with("pt") && quality > max_quality {
            preferred = Language::Portuguese;
            max_quality = quality;
        } else if tag.starts_with("en") && quality > max_quality {
            preferred = Language::English;
            max_quality = quality;
        }
    }

    preferred
}

/// Helper function to get localized message
fn localized(lang: Language, en: &str, pt: &str) -> String {
    match lang {
        Language::English => en.to_string(),
        Language::Portuguese => pt.to_string(),
    }
}

/// The message shown when the third failed attempt blocks the account.
/// Unlike the generic invalid-credentials message, this one must clearly
/// state the situation and who to contact.
pub fn account_blocked_response(lang: Language) -> HttpResponse {
    HttpResponse::Forbidden().json(ErrorResponse::new(
        error_codes::ACCOUNT_BLOCKED,
        localized(
            lang,
            "Your account has been blocked after repeated failed logins. Contact an administrator to restore access",
            "Sua conta foi bloqueada após sucessivas tentativas de login. Contate um administrador para restaurar o acesso",
        ),
    ))
}

/// The generic invalid-credentials message. The attempt count and the
/// lockout threshold are deliberately not leaked here.
pub fn invalid_credentials_response(lang: Language) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::INVALID_CREDENTIALS,
        localized(lang, "Invalid email or password", "E-mail ou senha inválidos"),
    ))
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError, lang: Language) -> HttpResponse {
    log::error!("Domain error: {:?}", error);

    match error {
        DomainError::Access(access_error) => match access_error {
            AccessError::InvalidCredentials => invalid_credentials_response(lang),
            AccessError::AccountBlocked => account_blocked_response(lang),
            AccessError::FirstAccessPending => HttpResponse::Forbidden().json(ErrorResponse::new(
                error_codes::FIRST_ACCESS_REQUIRED,
                localized(
                    lang,
                    "You must change your password before using the system",
                    "Você precisa alterar sua senha antes de usar o sistema",
                ),
            )),
            AccessError::Forbidden => HttpResponse::Forbidden().json(ErrorResponse::new(
                error_codes::FORBIDDEN,
                localized(
                    lang,
                    "This operation requires the master administrator role",
                    "Esta operação requer o papel de administrador master",
                ),
            )),
            AccessError::AccountNotFound => HttpResponse::NotFound().json(ErrorResponse::new(
                error_codes::NOT_FOUND,
                localized(lang, "Account not found", "Conta não encontrada"),
            )),
        },
        DomainError::Password(password_error) => match password_error {
            PasswordError::WeakPassword => weak_password_response(lang),
            PasswordError::Mismatch => password_mismatch_response(lang),
        },
        DomainError::Validation { message } => HttpResponse::BadRequest().json(
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message),
        ),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            localized(
                lang,
                &format!("{resource} not found"),
                &format!("{resource} não encontrado"),
            ),
        )),
        DomainError::Storage { .. } => HttpResponse::ServiceUnavailable().json(
            ErrorResponse::new(
                error_codes::STORAGE_UNAVAILABLE,
                localized(
                    lang,
                    "The service is temporarily unavailable. Please try again",
                    "O serviço está temporariamente indisponível. Tente novamente",
                ),
            ),
        ),
        DomainError::Provider { .. } => HttpResponse::ServiceUnavailable().json(
            ErrorResponse::new(
                error_codes::PROVIDER_UNAVAILABLE,
                localized(
                    lang,
                    "The service is temporarily unavailable. Please try again",
                    "O serviço está temporariamente indisponível. Tente novamente",
                ),
            ),
        ),
        DomainError::EmailDelivery { .. } => HttpResponse::BadGateway().json(ErrorResponse::new(
            error_codes::EMAIL_DELIVERY_FAILED,
            localized(
                lang,
                "The password was changed, but the email could not be delivered. Send the temporary password through another channel",
                "A senha foi alterada, mas o e-mail não pôde ser entregue. Envie a senha temporária por outro canal",
            ),
        )),
        DomainError::Internal { .. } => HttpResponse::InternalServerError().json(
            ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                localized(lang, "An internal error occurred", "Ocorreu um erro interno"),
            ),
        ),
    }
}

/// Weak-password response used by the rotation flow
pub fn weak_password_response(lang: Language) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::WEAK_PASSWORD,
        localized(
            lang,
            "The password must have at least 8 characters, one uppercase letter, one digit and one special character",
            "A senha deve ter no mínimo 8 caracteres, uma letra maiúscula, um número e um caractere especial",
        ),
    ))
}

/// Confirmation-mismatch response used by the rotation flow
pub fn password_mismatch_response(lang: Language) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::PASSWORD_MISMATCH,
        localized(
            lang,
            "The password confirmation does not match",
            "A confirmação da senha não confere",
        ),
    ))
}

/// Bad-request response for failed DTO validation
pub fn validation_error_response(
    errors: validator::ValidationErrors,
    lang: Language,
) -> HttpResponse {
    let response = ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        localized(lang, "Invalid request data", "Dados da requisição inválidos"),
    )
    .add_detail("validation_errors", serde_json::json!(errors));

    HttpResponse::BadRequest().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_language_negotiation_prefers_quality() {
        let req = TestRequest::default()
            .insert_header((header::ACCEPT_LANGUAGE, "en;q=0.5,pt-BR;q=0.9"))
            .to_http_request();
        assert_eq!(language_from_request(&req), Language::Portuguese);

        let req = TestRequest::default()
            .insert_header((header::ACCEPT_LANGUAGE, "en-US,en;q=0.9,pt;q=0.3"))
            .to_http_request();
        assert_eq!(language_from_request(&req), Language::English);
    }

    #[test]
    fn test_missing_header_defaults_to_english() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(language_from_request(&req), Language::English);
    }
}
