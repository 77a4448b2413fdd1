//! Privileged administrative route handlers
//!
//! Server-side-only surface for account lifecycle management. Every handler
//! re-reads the caller's account row and the services enforce the master
//! administrator role; nothing here trusts role claims from the client.

pub mod accounts;
pub mod audit;
pub mod block;
pub mod invite;
pub mod reset;
pub mod set_password;

use actix_web::HttpResponse;

use fd_core::domain::entities::account::Account;
use fd_core::errors::DomainError;
use fd_core::services::access::ensure_normal_use;
use fd_shared::types::Language;

use crate::handlers::error::handle_domain_error;

/// Refuse callers whose session is still restricted to the rotation flow.
///
/// A session with `first_access_required` set may complete the rotation and
/// nothing else.
pub(crate) fn require_normal_session(
    caller: &Account,
    lang: Language,
) -> Result<(), HttpResponse> {
    ensure_normal_use(caller)
        .map_err(|e| handle_domain_error(DomainError::Access(e), lang))
}
