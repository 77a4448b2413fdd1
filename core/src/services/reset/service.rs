//! Password reset service: self-service and administrator-triggered
//! credential rotation.
//!
//! Every reset rotates the credential at the identity provider, re-arms the
//! first-access gate, and (except for the literal set-password path) mails
//! the temporary credential to the account owner. Rotation failure aborts
//! the whole operation; email failure after a committed rotation is
//! surfaced distinctly so the caller knows to hand the credential over
//! another channel.

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::audit::AuditAction;
use crate::domain::value_objects::AdminPasswordOutcome;
use crate::errors::{AccessError, DomainError, DomainResult};
use crate::repositories::{AccountRepository, AuditEventRepository};
use crate::services::access::PasswordPolicy;
use crate::services::audit::AuditService;
use crate::services::email::{mask_email, EmailSenderTrait};
use crate::services::identity::{IdentityProviderTrait, ProviderError};

use fd_shared::config::AccessPolicyConfig;

/// Service for rotating account credentials
pub struct PasswordResetService<A, P, M, E>
where
    A: AccountRepository,
    P: IdentityProviderTrait,
    M: EmailSenderTrait,
    E: AuditEventRepository,
{
    account_repository: Arc<A>,
    identity_provider: Arc<P>,
    email_sender: Arc<M>,
    audit_service: Arc<AuditService<E>>,
    policy: PasswordPolicy,
    config: AccessPolicyConfig,
}

impl<A, P, M, E> PasswordResetService<A, P, M, E>
where
    A: AccountRepository,
    P: IdentityProviderTrait,
    M: EmailSenderTrait,
    E: AuditEventRepository + 'static,
{
    /// Create a new password reset service
    pub fn new(
        account_repository: Arc<A>,
        identity_provider: Arc<P>,
        email_sender: Arc<M>,
        audit_service: Arc<AuditService<E>>,
        config: AccessPolicyConfig,
    ) -> Self {
        Self {
            account_repository,
            identity_provider,
            email_sender,
            audit_service,
            policy: PasswordPolicy::from_config(&config),
            config,
        }
    }

    /// Self-service reset requested from the login screen.
    ///
    /// Always appears to succeed for unknown emails so the endpoint cannot
    /// be used to probe which addresses are registered; in that case nothing
    /// is mutated and no email is sent.
    pub async fn request_self_reset(&self, email: &str) -> DomainResult<()> {
        let account = match self.account_repository.find_by_email(email).await? {
            Some(account) => account,
            None => {
                info!(email = %mask_email(email), "self reset requested for unknown email");
                return Ok(());
            }
        };

        self.rotate_to_temporary(&account, None, "self_reset").await
    }

    /// Administrator-triggered reset. Requires the master administrator
    /// role; any other caller is refused without mutation.
    ///
    /// Does NOT clear the block flag: resetting a credential and unblocking
    /// an account are independent operations.
    pub async fn admin_reset(&self, caller: &Account, target_id: Uuid) -> DomainResult<()> {
        if !caller.is_master_admin() {
            warn!(
                caller_id = %caller.id,
                %target_id,
                "admin reset refused for non-master caller"
            );
            return Err(DomainError::Access(AccessError::Forbidden));
        }

        let target = self
            .account_repository
            .find_by_id(target_id)
            .await?
            .ok_or(DomainError::Access(AccessError::AccountNotFound))?;

        self.rotate_to_temporary(&target, Some(caller.email.as_str()), "admin_reset")
            .await
    }

    /// Administrator sets a literal password, to be handed to the user
    /// out-of-band. No generator, no email; the first-access gate is still
    /// re-armed because the user did not choose this password themselves.
    pub async fn admin_set_password(
        &self,
        caller: &Account,
        target_id: Uuid,
        new_password: &str,
    ) -> DomainResult<AdminPasswordOutcome> {
        if !caller.is_master_admin() {
            warn!(
                caller_id = %caller.id,
                %target_id,
                "admin set-password refused for non-master caller"
            );
            return Ok(AdminPasswordOutcome::Forbidden);
        }

        let target = self
            .account_repository
            .find_by_id(target_id)
            .await?
            .ok_or(DomainError::Access(AccessError::AccountNotFound))?;

        self.rotate_credential(&target, new_password).await?;
        self.account_repository
            .set_first_access_required(target.id, true)
            .await?;

        self.audit_service
            .record_change(
                AuditAction::Update,
                "accounts",
                Some(&caller.email),
                None,
                Some(serde_json::json!({
                    "email": target.email,
                    "operation": "admin_set_password",
                    "first_access_required": true,
                })),
            )
            .await;

        info!(target_id = %target.id, "administrator set a literal password");
        Ok(AdminPasswordOutcome::Completed)
    }

    /// Shared rotation path for the email-dispatching resets.
    async fn rotate_to_temporary(
        &self,
        target: &Account,
        actor_email: Option<&str>,
        operation: &str,
    ) -> DomainResult<()> {
        let temporary = self
            .policy
            .generate_temporary(self.config.temp_password_length);

        // Rotation failure aborts here: the flag is only re-armed after the
        // provider has accepted the new credential.
        self.rotate_credential(target, &temporary).await?;
        self.account_repository
            .set_first_access_required(target.id, true)
            .await?;

        self.audit_service
            .record_change(
                AuditAction::Update,
                "accounts",
                actor_email,
                None,
                Some(serde_json::json!({
                    "email": target.email,
                    "operation": operation,
                    "first_access_required": true,
                })),
            )
            .await;

        let subject = "FinDesk - temporary password";
        let body = temporary_password_body(&target.display_name, &temporary);

        if let Err(reason) = self
            .email_sender
            .send_email(&target.email, subject, &body)
            .await
        {
            // The credential has already changed; tell the caller plainly
            warn!(
                target_id = %target.id,
                email = %mask_email(&target.email),
                "temporary password email failed after rotation"
            );
            return Err(DomainError::EmailDelivery { message: reason });
        }

        info!(
            target_id = %target.id,
            email = %mask_email(&target.email),
            operation,
            "credential rotated and temporary password sent"
        );
        Ok(())
    }

    async fn rotate_credential(&self, target: &Account, password: &str) -> DomainResult<()> {
        match self.identity_provider.set_password(target.id, password).await {
            Ok(()) => Ok(()),
            Err(ProviderError::Unavailable(message)) => Err(DomainError::Provider { message }),
            Err(e) => Err(DomainError::Provider {
                message: e.to_string(),
            }),
        }
    }
}

/// HTML body of the temporary password email. The credential travels in
/// cleartext by design: the receiving user must rotate it on first login.
fn temporary_password_body(display_name: &str, temporary: &str) -> String {
    format!(
        "<p>Olá {display_name},</p>\
         <p>Sua senha temporária de acesso ao FinDesk é: <strong>{temporary}</strong></p>\
         <p>Você deverá alterá-la no primeiro acesso.</p>\
         <p>— Equipe FinDesk</p>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_body_carries_credential() {
        let body = temporary_password_body("Ana", "Tmp9!xyzAb-c");
        assert!(body.contains("Ana"));
        assert!(body.contains("Tmp9!xyzAb-c"));
    }
}
