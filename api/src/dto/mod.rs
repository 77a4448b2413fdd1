//! Request and response data transfer objects.

pub mod admin;
pub mod auth;

pub use admin::{AccountResponse, InviteRequest, SetPasswordRequest, UpdateProfileRequest};
pub use auth::{
    FirstAccessRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
};

// The error response body is shared with the other layers
pub use fd_shared::errors::ErrorResponse;
