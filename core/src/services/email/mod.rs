//! Transactional email boundary.

use async_trait::async_trait;

/// Contract for the external transactional email sender
#[async_trait]
pub trait EmailSenderTrait: Send + Sync {
    /// Send one email
    ///
    /// # Arguments
    /// * `to` - Recipient address
    /// * `subject` - Message subject
    /// * `body_html` - HTML body
    ///
    /// # Returns
    /// * `Ok(message_id)` - Provider-assigned message identifier
    /// * `Err(reason)` - Delivery failed; the caller decides what that means
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body_html: &str,
    ) -> Result<String, String>;
}

/// Mask an email address for logging, keeping the first character and domain
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let head = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", head, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("ana.silva@empresa.com"), "a***@empresa.com");
        assert_eq!(mask_email("x@y.com"), "x***@y.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
