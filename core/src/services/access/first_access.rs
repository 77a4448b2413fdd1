//! First-access gate: the mandatory password rotation after invite or reset.
//!
//! A session whose account still has `first_access_required` set is only
//! valid for the rotation flow. Every other operation must call
//! `ensure_normal_use` before proceeding.

use std::sync::Arc;
use tracing::info;

use crate::domain::entities::account::Account;
use crate::domain::value_objects::RotationOutcome;
use crate::errors::{AccessError, DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::identity::{IdentityProviderTrait, ProviderError};
use uuid::Uuid;

use super::password_policy::PasswordPolicy;

/// Whether the account must rotate its password before normal use
pub fn requires_rotation(account: &Account) -> bool {
    account.first_access_required
}

/// Enforce the hard invariant: an account with the first-access flag set
/// may not perform anything except the rotation flow.
pub fn ensure_normal_use(account: &Account) -> Result<(), AccessError> {
    if account.first_access_required {
        Err(AccessError::FirstAccessPending)
    } else {
        Ok(())
    }
}

/// Gate that forces the mandatory first-access rotation
pub struct FirstAccessGate<A, P>
where
    A: AccountRepository,
    P: IdentityProviderTrait,
{
    account_repository: Arc<A>,
    identity_provider: Arc<P>,
    policy: PasswordPolicy,
}

impl<A, P> FirstAccessGate<A, P>
where
    A: AccountRepository,
    P: IdentityProviderTrait,
{
    /// Create a new first-access gate
    pub fn new(
        account_repository: Arc<A>,
        identity_provider: Arc<P>,
        policy: PasswordPolicy,
    ) -> Self {
        Self {
            account_repository,
            identity_provider,
            policy,
        }
    }

    /// Complete the mandatory rotation.
    ///
    /// Validates the candidate against the password policy, checks it
    /// against the repeated confirmation, rotates the credential at the
    /// identity provider, and clears the first-access flag. Policy and
    /// confirmation failures mutate nothing. Re-running with the same new
    /// password is safe: the credential is re-rotated to the same value and
    /// the flag stays cleared.
    pub async fn complete_rotation(
        &self,
        account_id: Uuid,
        new_password: &str,
        confirmation: &str,
    ) -> DomainResult<RotationOutcome> {
        if !self.policy.is_satisfied_by(new_password) {
            return Ok(RotationOutcome::WeakPassword);
        }

        if new_password != confirmation {
            return Ok(RotationOutcome::Mismatch);
        }

        let account = self
            .account_repository
            .find_by_id(account_id)
            .await?
            .ok_or(DomainError::Access(AccessError::AccountNotFound))?;

        match self
            .identity_provider
            .set_password(account.id, new_password)
            .await
        {
            Ok(()) => {}
            Err(ProviderError::Unavailable(message)) => {
                return Err(DomainError::Provider { message });
            }
            Err(e) => {
                return Err(DomainError::Provider {
                    message: e.to_string(),
                });
            }
        }

        self.account_repository
            .set_first_access_required(account.id, false)
            .await?;

        info!(account_id = %account.id, "first-access rotation completed");
        Ok(RotationOutcome::Completed)
    }
}
