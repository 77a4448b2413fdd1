//! Administrative account lifecycle: invite, block, unblock, delete.
//!
//! Every operation here is gated on the caller holding the master
//! administrator role, verified against the caller's own account row on the
//! server side. Master administrator accounts themselves can never be
//! blocked or deleted, by anyone.

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountRole};
use crate::domain::entities::audit::AuditAction;
use crate::errors::{AccessError, DomainError, DomainResult};
use crate::repositories::{AccountRepository, AuditEventRepository};
use crate::services::access::PasswordPolicy;
use crate::services::audit::AuditService;
use crate::services::email::{mask_email, EmailSenderTrait};
use crate::services::identity::{IdentityProviderTrait, ProviderError};

use fd_shared::config::AccessPolicyConfig;
use fd_shared::utils::validation::validators;

/// Fields supplied when inviting a new account
#[derive(Debug, Clone)]
pub struct AccountInvite {
    pub email: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub role: AccountRole,
}

/// Service for privileged account administration
pub struct AdminService<A, P, M, E>
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

impl<A, P, M, E> AdminService<A, P, M, E>
where
    A: AccountRepository,
    P: IdentityProviderTrait,
    M: EmailSenderTrait,
    E: AuditEventRepository + 'static,
{
    /// Create a new admin service
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

    /// Invite a new account.
    ///
    /// Creates the account row with the first-access gate armed, registers a
    /// generated temporary credential at the identity provider, and mails
    /// the credential to the new user.
    pub async fn invite(&self, caller: &Account, invite: AccountInvite) -> DomainResult<Account> {
        self.require_master(caller, "invite")?;

        if !validators::is_valid_email(&invite.email) {
            return Err(DomainError::Validation {
                message: format!("invalid email address: {}", mask_email(&invite.email)),
            });
        }
        if !validators::not_empty(&invite.display_name) {
            return Err(DomainError::Validation {
                message: "display name is required".to_string(),
            });
        }
        if self.account_repository.exists_by_email(&invite.email).await? {
            return Err(DomainError::Validation {
                message: "email already registered".to_string(),
            });
        }

        let mut account = Account::new(invite.email, invite.display_name, invite.role);
        account.phone = invite.phone;
        account.job_title = invite.job_title;

        let temporary = self
            .policy
            .generate_temporary(self.config.temp_password_length);

        let account = self.account_repository.create(account).await?;

        if let Err(e) = self
            .identity_provider
            .register(account.id, &account.email, &temporary)
            .await
        {
            // Roll the row back so a retried invite starts clean
            let _ = self.account_repository.delete(account.id).await;
            return Err(match e {
                ProviderError::Unavailable(message) => DomainError::Provider { message },
                other => DomainError::Provider {
                    message: other.to_string(),
                },
            });
        }

        self.audit_service
            .record_change(
                AuditAction::Insert,
                "accounts",
                Some(&caller.email),
                None,
                serde_json::to_value(&account).ok(),
            )
            .await;

        let subject = "FinDesk - your account";
        let body = invite_body(&account.display_name, &account.email, &temporary);
        if let Err(reason) = self
            .email_sender
            .send_email(&account.email, subject, &body)
            .await
        {
            warn!(
                account_id = %account.id,
                "invite email failed after account creation"
            );
            return Err(DomainError::EmailDelivery { message: reason });
        }

        info!(
            account_id = %account.id,
            email = %mask_email(&account.email),
            role = account.role.as_str(),
            "account invited"
        );
        Ok(account)
    }

    /// Block an account. Master administrator accounts can never be blocked;
    /// such an attempt is rejected without mutation.
    pub async fn block(&self, caller: &Account, target_id: Uuid) -> DomainResult<()> {
        self.require_master(caller, "block")?;

        let target = self.find_target(target_id).await?;
        if target.is_master_admin() {
            warn!(%target_id, "refused to block a master administrator account");
            return Err(DomainError::Access(AccessError::Forbidden));
        }

        self.account_repository.set_blocked(target.id).await?;

        self.audit_service
            .record_change(
                AuditAction::Update,
                "accounts",
                Some(&caller.email),
                Some(serde_json::json!({ "email": target.email, "is_blocked": target.is_blocked })),
                Some(serde_json::json!({ "email": target.email, "is_blocked": true })),
            )
            .await;

        info!(%target_id, "account blocked by administrator");
        Ok(())
    }

    /// Unblock an account, clearing the failed-attempt counter in the same
    /// update. Idempotent: unblocking an already-active account still
    /// zeroes the counter.
    pub async fn unblock(&self, caller: &Account, target_id: Uuid) -> DomainResult<()> {
        self.require_master(caller, "unblock")?;

        let target = self.find_target(target_id).await?;
        self.account_repository.unblock(target.id).await?;

        self.audit_service
            .record_change(
                AuditAction::Update,
                "accounts",
                Some(&caller.email),
                Some(serde_json::json!({ "email": target.email, "is_blocked": target.is_blocked })),
                Some(serde_json::json!({
                    "email": target.email,
                    "is_blocked": false,
                    "failed_attempts": 0,
                })),
            )
            .await;

        info!(%target_id, "account unblocked by administrator");
        Ok(())
    }

    /// Delete an account. Master administrator accounts can never be
    /// deleted; such an attempt is rejected without mutation.
    pub async fn delete(&self, caller: &Account, target_id: Uuid) -> DomainResult<()> {
        self.require_master(caller, "delete")?;

        let target = self.find_target(target_id).await?;
        if target.is_master_admin() {
            warn!(%target_id, "refused to delete a master administrator account");
            return Err(DomainError::Access(AccessError::Forbidden));
        }

        self.account_repository.delete(target.id).await?;

        self.audit_service
            .record_change(
                AuditAction::Delete,
                "accounts",
                Some(&caller.email),
                serde_json::to_value(&target).ok(),
                None,
            )
            .await;

        info!(%target_id, "account deleted by administrator");
        Ok(())
    }

    /// Update the descriptive profile fields. Allowed for the account owner
    /// and for master administrators.
    pub async fn update_profile(
        &self,
        caller: &Account,
        target_id: Uuid,
        display_name: Option<String>,
        phone: Option<String>,
        job_title: Option<String>,
    ) -> DomainResult<Account> {
        if caller.id != target_id && !caller.is_master_admin() {
            return Err(DomainError::Access(AccessError::Forbidden));
        }

        let mut target = self.find_target(target_id).await?;
        let before = serde_json::to_value(&target).ok();

        if let Some(display_name) = display_name {
            if !validators::not_empty(&display_name) {
                return Err(DomainError::Validation {
                    message: "display name is required".to_string(),
                });
            }
            target.display_name = display_name;
        }
        if phone.is_some() {
            target.phone = phone;
        }
        if job_title.is_some() {
            target.job_title = job_title;
        }
        target.updated_at = chrono::Utc::now();

        let updated = self.account_repository.update(target).await?;

        self.audit_service
            .record_change(
                AuditAction::Update,
                "accounts",
                Some(&caller.email),
                before,
                serde_json::to_value(&updated).ok(),
            )
            .await;

        Ok(updated)
    }

    fn require_master(&self, caller: &Account, operation: &str) -> DomainResult<()> {
        if caller.is_master_admin() {
            Ok(())
        } else {
            warn!(
                caller_id = %caller.id,
                operation,
                "privileged operation refused for non-master caller"
            );
            Err(DomainError::Access(AccessError::Forbidden))
        }
    }

    async fn find_target(&self, target_id: Uuid) -> DomainResult<Account> {
        self.account_repository
            .find_by_id(target_id)
            .await?
            .ok_or(DomainError::Access(AccessError::AccountNotFound))
    }
}

/// HTML body of the invite email
fn invite_body(display_name: &str, email: &str, temporary: &str) -> String {
    format!(
        "<p>Olá {display_name},</p>\
         <p>Seu acesso ao FinDesk foi criado para o e-mail <strong>{email}</strong>.</p>\
         <p>Senha temporária: <strong>{temporary}</strong></p>\
         <p>Você deverá alterá-la no primeiro acesso.</p>\
         <p>— Equipe FinDesk</p>"
    )
}
