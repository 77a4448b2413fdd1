use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::handlers::error::{handle_domain_error, language_from_request};
use crate::middleware::AuthContext;
use crate::routes::{load_caller, AppState};

use fd_core::errors::{AccessError, DomainError};
use fd_core::repositories::{AccountRepository, AuditEventRepository};
use fd_core::services::email::EmailSenderTrait;
use fd_core::services::identity::IdentityProviderTrait;

use super::require_normal_session;

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 500;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    /// Maximum number of events to return (newest first)
    pub limit: Option<usize>,
    /// Restrict to one resource (e.g. "accounts")
    pub resource: Option<String>,
}

/// Handler for GET /api/v1/admin/audit
///
/// Returns recent audit events, newest first. Master administrator only:
/// the trail records every identity operation and must not leak to
/// ordinary users.
///
/// # Response
///
/// - 200 OK: list of audit events
/// - 403 Forbidden: caller is not a master administrator
pub async fn list_events<A, P, M, E>(
    req: HttpRequest,
    context: AuthContext,
    state: web::Data<AppState<A, P, M, E>>,
    query: web::Query<AuditQuery>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    P: IdentityProviderTrait + 'static,
    M: EmailSenderTrait + 'static,
    E: AuditEventRepository + 'static,
{
    let lang = language_from_request(&req);

    let caller = match load_caller(state.account_repository.as_ref(), &context).await {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    if let Err(response) = require_normal_session(&caller, lang) {
        return response;
    }
    if !caller.is_master_admin() {
        return handle_domain_error(DomainError::Access(AccessError::Forbidden), lang);
    }

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

    let result = match &query.resource {
        Some(resource) => state.audit_service.events_for_resource(resource, limit).await,
        None => state.audit_service.recent_events(limit).await,
    };

    match result {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(error) => handle_domain_error(error, lang),
    }
}
