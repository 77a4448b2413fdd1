//! Mock implementations for testing the access services

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::services::identity::{
    IdentityProviderTrait, ProviderError, ProviderSession, TokenIdentity,
};

/// In-memory identity provider: stores cleartext credentials per account
/// and mints `token-<uuid>` access tokens.
pub struct MockIdentityProvider {
    pub passwords: Arc<Mutex<HashMap<Uuid, String>>>,
    pub emails: Arc<Mutex<HashMap<String, Uuid>>>,
    pub unavailable: Arc<Mutex<bool>>,
    pub sign_in_calls: Arc<Mutex<u32>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            passwords: Arc::new(Mutex::new(HashMap::new())),
            emails: Arc::new(Mutex::new(HashMap::new())),
            unavailable: Arc::new(Mutex::new(false)),
            sign_in_calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Register a credential for an existing account
    pub fn with_credential(self, account: &Account, password: &str) -> Self {
        self.passwords
            .lock()
            .unwrap()
            .insert(account.id, password.to_string());
        self.emails
            .lock()
            .unwrap()
            .insert(account.email.clone(), account.id);
        self
    }

    /// Simulate a provider outage
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    /// Number of sign-in round-trips performed
    pub fn sign_in_count(&self) -> u32 {
        *self.sign_in_calls.lock().unwrap()
    }

    /// Current credential for an account, for assertions
    pub fn password_of(&self, account_id: Uuid) -> Option<String> {
        self.passwords.lock().unwrap().get(&account_id).cloned()
    }

    fn check_outage(&self) -> Result<(), ProviderError> {
        if *self.unavailable.lock().unwrap() {
            return Err(ProviderError::Unavailable("mock outage".to_string()));
        }
        Ok(())
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProviderTrait for MockIdentityProvider {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.check_outage()?;
        *self.sign_in_calls.lock().unwrap() += 1;

        let account_id = {
            let emails = self.emails.lock().unwrap();
            emails.get(email).copied()
        };
        let account_id = account_id.ok_or(ProviderError::InvalidCredentials)?;

        let passwords = self.passwords.lock().unwrap();
        match passwords.get(&account_id) {
            Some(stored) if stored == password => Ok(ProviderSession {
                access_token: format!("token-{account_id}"),
                expires_in: 3600,
            }),
            _ => Err(ProviderError::InvalidCredentials),
        }
    }

    async fn set_password(
        &self,
        account_id: Uuid,
        new_password: &str,
    ) -> Result<(), ProviderError> {
        self.check_outage()?;
        self.passwords
            .lock()
            .unwrap()
            .insert(account_id, new_password.to_string());
        Ok(())
    }

    async fn register(
        &self,
        account_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<(), ProviderError> {
        self.check_outage()?;
        self.emails
            .lock()
            .unwrap()
            .insert(email.to_string(), account_id);
        self.passwords
            .lock()
            .unwrap()
            .insert(account_id, password.to_string());
        Ok(())
    }

    async fn verify_token(&self, access_token: &str) -> Result<TokenIdentity, ProviderError> {
        self.check_outage()?;
        let raw_id = access_token
            .strip_prefix("token-")
            .ok_or(ProviderError::InvalidToken)?;
        let account_id = Uuid::parse_str(raw_id).map_err(|_| ProviderError::InvalidToken)?;

        let emails = self.emails.lock().unwrap();
        let email = emails
            .iter()
            .find(|(_, id)| **id == account_id)
            .map(|(email, _)| email.clone())
            .ok_or(ProviderError::InvalidToken)?;

        Ok(TokenIdentity { account_id, email })
    }
}
