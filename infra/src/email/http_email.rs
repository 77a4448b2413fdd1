//! Transactional email HTTP client.
//!
//! Sends mail through a JSON transactional email API. Delivery failures
//! are reported back to the caller as plain strings; the core decides what
//! a failed send means for the operation in flight.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use fd_core::services::email::{mask_email, EmailSenderTrait};
use fd_shared::config::EmailConfig;

use crate::InfrastructureError;

/// Transactional email service backed by an HTTP API
pub struct HttpEmailSender {
    client: reqwest::Client,
    config: EmailConfig,
}

impl HttpEmailSender {
    /// Create a new email sender
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_url.is_empty() {
            return Err(InfrastructureError::Config(
                "email API URL not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(EmailConfig::from_env())
    }
}

#[async_trait]
impl EmailSenderTrait for HttpEmailSender {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body_html: &str,
    ) -> Result<String, String> {
        let payload = serde_json::json!({
            "from": {
                "email": self.config.from_address,
                "name": self.config.from_name,
            },
            "to": [{ "email": to }],
            "subject": subject,
            "html": body_html,
        });

        let mut delay = Duration::from_millis(500);
        let mut last_error = String::new();

        for attempt in 0..=self.config.max_retries {
            let result = self
                .client
                .post(&self.config.api_url)
                .header("Authorization", format!("Bearer {}", self.config.api_key))
                .json(&payload)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    let message_id = response
                        .headers()
                        .get("x-message-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown")
                        .to_string();
                    debug!(
                        to = %mask_email(to),
                        message_id = %message_id,
                        "email accepted by provider"
                    );
                    return Ok(message_id);
                }
                Ok(response) if response.status().is_client_error() => {
                    // A rejected payload will not get better on retry
                    let status = response.status();
                    warn!(to = %mask_email(to), %status, "email rejected by provider");
                    return Err(format!("email provider rejected the message: {status}"));
                }
                Ok(response) => {
                    last_error = format!("email provider returned {}", response.status());
                    warn!(to = %mask_email(to), attempt, error = %last_error, "email send failed");
                }
                Err(e) => {
                    last_error = e.to_string();
                    warn!(to = %mask_email(to), attempt, error = %last_error, "email send failed");
                }
            }

            if attempt < self.config.max_retries {
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
        }

        Err(last_error)
    }
}
