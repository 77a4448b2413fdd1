//! Identity provider boundary.
//!
//! The provider owns the credential hashes and mints sessions; the
//! controller only writes credentials (rotation) and asks for sign-ins.
//! It is never the source of truth for role or first-access status.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Session minted by the identity provider on a successful sign-in
#[derive(Debug, Clone)]
pub struct ProviderSession {
    /// Opaque access token for subsequent requests
    pub access_token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Identity resolved from a provider-issued access token
#[derive(Debug, Clone)]
pub struct TokenIdentity {
    /// Account the token was minted for
    pub account_id: Uuid,
    /// Email recorded in the token
    pub email: String,
}

/// Errors returned by the identity provider boundary
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The email/password pair did not match the stored credential
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The access token is missing, malformed, or expired
    #[error("invalid token")]
    InvalidToken,

    /// The provider could not be reached or answered with a server error.
    /// Callers must treat this as a transient failure and fail closed.
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Contract for the external identity provider
#[async_trait]
pub trait IdentityProviderTrait: Send + Sync {
    /// Verify an email/password pair and mint a session on success
    async fn sign_in(&self, email: &str, password: &str)
        -> Result<ProviderSession, ProviderError>;

    /// Rotate the stored credential for an account
    async fn set_password(&self, account_id: Uuid, new_password: &str)
        -> Result<(), ProviderError>;

    /// Register a new credential for an invited account
    async fn register(
        &self,
        account_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<(), ProviderError>;

    /// Resolve a provider-issued access token back to an identity
    async fn verify_token(&self, access_token: &str) -> Result<TokenIdentity, ProviderError>;
}
