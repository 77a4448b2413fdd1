//! Mock email sender for development and testing.
//!
//! Logs messages instead of sending them, so the invite and reset flows can
//! be exercised locally without an email provider account.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use fd_core::services::email::{mask_email, EmailSenderTrait};

/// Mock email sender that logs messages to the console
#[derive(Clone)]
pub struct MockEmailSender {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl MockEmailSender {
    /// Create a new mock email sender
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    /// Create a mock sender that fails every send
    pub fn failing() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: true,
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockEmailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailSenderTrait for MockEmailSender {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body_html: &str,
    ) -> Result<String, String> {
        if self.simulate_failure {
            warn!(to = %mask_email(to), "mock email sender simulating failure");
            return Err("simulated email failure".to_string());
        }

        let message_id = Uuid::new_v4().to_string();
        self.message_count.fetch_add(1, Ordering::SeqCst);

        info!(
            to = %mask_email(to),
            subject,
            body_length = body_html.len(),
            message_id = %message_id,
            "mock email sent"
        );

        Ok(message_id)
    }
}
