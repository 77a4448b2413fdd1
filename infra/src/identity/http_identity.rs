//! HTTP identity provider client.
//!
//! Talks to the external identity provider's JSON API. The provider owns
//! credential hashes and session minting; this client only exchanges
//! passwords for sessions, rotates credentials, registers invited accounts,
//! and resolves access tokens.
//!
//! ## Features
//!
//! - Automatic retry with exponential backoff for transient failures
//! - Fail-closed error mapping: transport problems surface as
//!   `ProviderError::Unavailable`, never as a successful verification
//! - Security: email masking in logs

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, warn};
use uuid::Uuid;

use fd_core::services::email::mask_email;
use fd_core::services::identity::{
    IdentityProviderTrait, ProviderError, ProviderSession, TokenIdentity,
};
use fd_shared::config::IdentityConfig;

use crate::InfrastructureError;

/// HTTP identity provider client
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    config: IdentityConfig,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
    #[serde(default)]
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
    email: String,
}

impl HttpIdentityProvider {
    /// Create a new identity provider client
    pub fn new(config: IdentityConfig) -> Result<Self, InfrastructureError> {
        if config.base_url.is_empty() {
            return Err(InfrastructureError::Config(
                "identity provider base URL not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(IdentityConfig::from_env())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Issue a privileged request, retrying transient failures with
    /// exponential backoff. Client errors (4xx) are never retried.
    async fn send_privileged(
        &self,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ProviderError> {
        let mut delay = Duration::from_millis(250);

        for attempt in 0..=self.config.max_retries {
            let request = build()
                .header("Authorization", format!("Bearer {}", self.config.service_key));

            match request.send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) if response.status().is_client_error() => {
                    let status = response.status();
                    error!(%status, "identity provider rejected privileged request");
                    return Err(ProviderError::Unavailable(format!(
                        "provider rejected request with status {status}"
                    )));
                }
                Ok(response) => {
                    warn!(
                        status = %response.status(),
                        attempt,
                        "identity provider returned server error"
                    );
                }
                Err(e) => {
                    warn!(error = %e, attempt, "identity provider request failed");
                }
            }

            if attempt < self.config.max_retries {
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
        }

        Err(ProviderError::Unavailable(
            "provider unreachable after retries".to_string(),
        ))
    }
}

#[async_trait]
impl IdentityProviderTrait for HttpIdentityProvider {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        debug!(email = %mask_email(email), "sign-in request");

        let response = self
            .client
            .post(self.endpoint("token?grant_type=password"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let session: SessionResponse = response
                .json()
                .await
                .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
            return Ok(ProviderSession {
                access_token: session.access_token,
                expires_in: session.expires_in,
            });
        }

        if status.is_client_error() {
            // Wrong password and unknown user look identical here
            return Err(ProviderError::InvalidCredentials);
        }

        Err(ProviderError::Unavailable(format!(
            "sign-in failed with status {status}"
        )))
    }

    async fn set_password(
        &self,
        account_id: Uuid,
        new_password: &str,
    ) -> Result<(), ProviderError> {
        let path = format!("admin/users/{account_id}");
        let body = serde_json::json!({ "password": new_password });

        self.send_privileged(|| self.client.put(self.endpoint(&path)).json(&body))
            .await?;

        debug!(%account_id, "credential rotated at provider");
        Ok(())
    }

    async fn register(
        &self,
        account_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<(), ProviderError> {
        let body = serde_json::json!({
            "id": account_id,
            "email": email,
            "password": password,
            "email_confirm": true,
        });

        self.send_privileged(|| self.client.post(self.endpoint("admin/users")).json(&body))
            .await?;

        debug!(%account_id, email = %mask_email(email), "account registered at provider");
        Ok(())
    }

    async fn verify_token(&self, access_token: &str) -> Result<TokenIdentity, ProviderError> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .header("Authorization", format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let user: UserResponse = response
                .json()
                .await
                .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
            return Ok(TokenIdentity {
                account_id: user.id,
                email: user.email,
            });
        }

        if status.is_client_error() {
            return Err(ProviderError::InvalidToken);
        }

        Err(ProviderError::Unavailable(format!(
            "token verification failed with status {status}"
        )))
    }
}
