use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use fd_core::domain::entities::account::Account;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InviteRequest {
    /// Email address for the new account
    #[validate(email)]
    pub email: String,

    /// Display name shown across the back-office
    #[validate(length(min = 1, max = 120))]
    pub display_name: String,

    /// Contact phone number
    #[validate(length(max = 30))]
    pub phone: Option<String>,

    /// Job title within the company
    #[validate(length(max = 120))]
    pub job_title: Option<String>,

    /// Capability tier: MASTER_ADMIN, ADMIN or USER
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetPasswordRequest {
    /// Literal password to hand to the user out-of-band
    #[validate(length(min = 1, max = 128))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name, when changing it
    #[validate(length(min = 1, max = 120))]
    pub display_name: Option<String>,

    /// New contact phone number
    #[validate(length(max = 30))]
    pub phone: Option<String>,

    /// New job title
    #[validate(length(max = 120))]
    pub job_title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub role: String,
    pub is_blocked: bool,
    pub first_access_required: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            display_name: account.display_name,
            phone: account.phone,
            job_title: account.job_title,
            role: account.role.as_str().to_string(),
            is_blocked: account.is_blocked,
            first_access_required: account.first_access_required,
            created_at: account.created_at,
            last_login_at: account.last_login_at,
        }
    }
}
