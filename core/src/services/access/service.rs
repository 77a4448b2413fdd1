//! Credential verification service.
//!
//! Orchestrates a login attempt: account lookup, blocked-account refusal,
//! delegation of the secret comparison to the identity provider, and the
//! attempt-tracker bookkeeping on both outcomes.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::account::Account;
use crate::domain::entities::session::AccountSession;
use crate::domain::value_objects::LoginOutcome;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccountRepository, AuditEventRepository};
use crate::services::email::mask_email;
use crate::services::identity::{IdentityProviderTrait, ProviderError};

use super::attempt_tracker::AttemptTracker;
use super::config::AccessServiceConfig;

/// Fixed invalid credential used for the dummy verification path, so an
/// unknown email takes roughly as long as a wrong password and does not
/// reveal which addresses are registered.
const DUMMY_PASSWORD: &str = "invalid-dummy-credential";

/// Service for verifying login attempts
pub struct AccessService<A, P, E>
where
    A: AccountRepository,
    P: IdentityProviderTrait,
    E: AuditEventRepository,
{
    /// Account repository for row lookups
    account_repository: Arc<A>,
    /// Identity provider that performs the actual secret comparison
    identity_provider: Arc<P>,
    /// Tracker for failed-attempt bookkeeping
    attempt_tracker: Arc<AttemptTracker<A, E>>,
    /// Service configuration
    config: AccessServiceConfig,
}

impl<A, P, E> AccessService<A, P, E>
where
    A: AccountRepository,
    P: IdentityProviderTrait,
    E: AuditEventRepository + 'static,
{
    /// Create a new access service
    pub fn new(
        account_repository: Arc<A>,
        identity_provider: Arc<P>,
        attempt_tracker: Arc<AttemptTracker<A, E>>,
        config: AccessServiceConfig,
    ) -> Self {
        Self {
            account_repository,
            identity_provider,
            attempt_tracker,
            config,
        }
    }

    /// Verify an email/password pair and mint a session on success.
    ///
    /// This method:
    /// 1. Rejects empty inputs as invalid credentials
    /// 2. Looks the account up case-insensitively; unknown emails still run
    ///    a dummy provider verification before being rejected
    /// 3. Refuses blocked accounts without comparing the password and
    ///    without moving the counter
    /// 4. Delegates the secret comparison to the identity provider
    /// 5. Records the failure or resets the counter, atomically per account
    ///
    /// Returns a typed [`LoginOutcome`] for everything the user can recover
    /// from; storage or provider unavailability comes back as a
    /// [`DomainError`] and denies the login.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutcome> {
        if email.trim().is_empty() || password.is_empty() {
            return Ok(LoginOutcome::invalid_credentials());
        }

        let account = match self.account_repository.find_by_email(email).await? {
            Some(account) => account,
            None => {
                // Unknown email: burn a provider round-trip anyway
                let _ = self
                    .identity_provider
                    .sign_in(email, DUMMY_PASSWORD)
                    .await;
                info!(email = %mask_email(email), "login attempt for unknown email");
                return Ok(LoginOutcome::invalid_credentials());
            }
        };

        if account.is_blocked {
            warn!(
                account_id = %account.id,
                "login attempt on blocked account refused"
            );
            return Ok(LoginOutcome::AccountBlocked);
        }

        match self.identity_provider.sign_in(&account.email, password).await {
            Ok(session) => {
                self.attempt_tracker.record_success(&account).await?;
                if let Err(e) = self.account_repository.touch_last_login(account.id).await {
                    warn!(account_id = %account.id, error = %e, "failed to update last login timestamp");
                }
                info!(account_id = %account.id, "login verified");
                Ok(LoginOutcome::Success(self.build_session(&account, session)))
            }
            Err(ProviderError::InvalidCredentials) => {
                let record = self.attempt_tracker.record_failure(&account).await?;
                Ok(LoginOutcome::InvalidCredentials {
                    lockout_tripped: record.just_blocked,
                })
            }
            Err(ProviderError::InvalidToken) => Err(DomainError::Provider {
                message: "unexpected token error during sign-in".to_string(),
            }),
            Err(ProviderError::Unavailable(message)) => {
                // Fail closed: an unreachable provider denies the login
                Err(DomainError::Provider { message })
            }
        }
    }

    fn build_session(
        &self,
        account: &Account,
        provider_session: crate::services::identity::ProviderSession,
    ) -> AccountSession {
        let expires_in = if provider_session.expires_in > 0 {
            provider_session.expires_in
        } else {
            self.config.default_session_ttl_secs
        };
        AccountSession::for_account(account, provider_session.access_token, expires_in)
    }
}
