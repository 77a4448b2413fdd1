//! Mock implementations for testing the administrative lifecycle service

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::services::email::EmailSenderTrait;
use crate::services::identity::{
    IdentityProviderTrait, ProviderError, ProviderSession, TokenIdentity,
};

/// Identity provider mock tracking registered credentials
pub struct MockIdentityProvider {
    pub registered: Arc<Mutex<HashMap<Uuid, (String, String)>>>,
    pub fail_register: Arc<Mutex<bool>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            registered: Arc::new(Mutex::new(HashMap::new())),
            fail_register: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_fail_register(&self, fail: bool) {
        *self.fail_register.lock().unwrap() = fail;
    }

    pub fn registered_credential(&self, account_id: Uuid) -> Option<(String, String)> {
        self.registered.lock().unwrap().get(&account_id).cloned()
    }
}

#[async_trait]
impl IdentityProviderTrait for MockIdentityProvider {
    async fn sign_in(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        Err(ProviderError::InvalidCredentials)
    }

    async fn set_password(
        &self,
        account_id: Uuid,
        new_password: &str,
    ) -> Result<(), ProviderError> {
        let mut registered = self.registered.lock().unwrap();
        if let Some(entry) = registered.get_mut(&account_id) {
            entry.1 = new_password.to_string();
        }
        Ok(())
    }

    async fn register(
        &self,
        account_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<(), ProviderError> {
        if *self.fail_register.lock().unwrap() {
            return Err(ProviderError::Unavailable("mock outage".to_string()));
        }
        self.registered
            .lock()
            .unwrap()
            .insert(account_id, (email.to_string(), password.to_string()));
        Ok(())
    }

    async fn verify_token(&self, _access_token: &str) -> Result<TokenIdentity, ProviderError> {
        Err(ProviderError::InvalidToken)
    }
}

/// Email sender mock that records outgoing messages
pub struct MockEmailSender {
    pub sent: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
        }
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
        self.sent.lock().unwrap().push((
            to.to_string(),
            subject.to_string(),
            body_html.to_string(),
        ));
        Ok("mock-message-id".to_string())
    }
}
