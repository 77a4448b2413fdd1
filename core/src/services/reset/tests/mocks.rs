//! Mock implementations for testing the password reset service

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::services::email::EmailSenderTrait;
use crate::services::identity::{
    IdentityProviderTrait, ProviderError, ProviderSession, TokenIdentity,
};

/// Identity provider mock that records credential rotations
pub struct RecordingIdentityProvider {
    pub rotations: Arc<Mutex<HashMap<Uuid, String>>>,
    pub unavailable: Arc<Mutex<bool>>,
}

impl RecordingIdentityProvider {
    pub fn new() -> Self {
        Self {
            rotations: Arc::new(Mutex::new(HashMap::new())),
            unavailable: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    /// Last credential rotated for an account, if any
    pub fn rotated_password(&self, account_id: Uuid) -> Option<String> {
        self.rotations.lock().unwrap().get(&account_id).cloned()
    }

    fn check_outage(&self) -> Result<(), ProviderError> {
        if *self.unavailable.lock().unwrap() {
            return Err(ProviderError::Unavailable("mock outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityProviderTrait for RecordingIdentityProvider {
    async fn sign_in(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.check_outage()?;
        Err(ProviderError::InvalidCredentials)
    }

    async fn set_password(
        &self,
        account_id: Uuid,
        new_password: &str,
    ) -> Result<(), ProviderError> {
        self.check_outage()?;
        self.rotations
            .lock()
            .unwrap()
            .insert(account_id, new_password.to_string());
        Ok(())
    }

    async fn register(
        &self,
        account_id: Uuid,
        _email: &str,
        password: &str,
    ) -> Result<(), ProviderError> {
        self.check_outage()?;
        self.rotations
            .lock()
            .unwrap()
            .insert(account_id, password.to_string());
        Ok(())
    }

    async fn verify_token(&self, _access_token: &str) -> Result<TokenIdentity, ProviderError> {
        Err(ProviderError::InvalidToken)
    }
}

/// Email sender mock that records outgoing messages
pub struct MockEmailSender {
    pub sent: Arc<Mutex<Vec<(String, String, String)>>>,
    pub should_fail: Arc<Mutex<bool>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    pub fn sent_messages(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
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
        if *self.should_fail.lock().unwrap() {
            return Err("smtp relay refused the message".to_string());
        }
        self.sent.lock().unwrap().push((
            to.to_string(),
            subject.to_string(),
            body_html.to_string(),
        ));
        Ok("mock-message-id".to_string())
    }
}
