use serde::{Deserialize, Serialize};
use validator::Validate;

use fd_core::domain::entities::session::AccountSession;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email address
    #[validate(email)]
    pub email: String,

    /// Account password
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub role: String,
    /// When true, the session is only valid for the password rotation flow
    pub first_access_required: bool,
}

impl From<AccountSession> for LoginResponse {
    fn from(session: AccountSession) -> Self {
        Self {
            access_token: session.access_token,
            expires_in: session.expires_in,
            role: session.role.as_str().to_string(),
            first_access_required: session.first_access_required,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FirstAccessRequest {
    /// The new password chosen by the account owner
    #[validate(length(min = 1, max = 128))]
    pub new_password: String,

    /// Repeated confirmation of the new password
    #[validate(length(min = 1, max = 128))]
    pub confirmation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    /// Email address of the account to reset
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
