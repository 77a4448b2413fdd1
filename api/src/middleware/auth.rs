//! Session authentication middleware for protecting API endpoints.
//!
//! Extracts the provider-issued access token from the Authorization header
//! and verifies it locally (HS256, shared secret). The token only proves
//! identity: role and first-access status are always re-read from the
//! account row by the handlers, never trusted from client input.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

/// Claims carried by provider-issued access tokens
#[derive(Debug, Deserialize)]
struct SessionClaims {
    /// Account identifier
    sub: String,
    /// Account email
    #[serde(default)]
    email: String,
    /// Expiry (validated by jsonwebtoken)
    #[allow(dead_code)]
    exp: usize,
}

/// Authenticated caller context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Account ID extracted from the token
    pub account_id: Uuid,
    /// Email extracted from the token
    pub email: String,
}

impl AuthContext {
    fn from_claims(claims: SessionClaims) -> Result<Self, String> {
        let account_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| "token subject is not a valid account id".to_string())?;
        Ok(Self {
            account_id,
            email: claims.email,
        })
    }
}

/// Session authentication middleware factory
pub struct SessionAuth {
    jwt_secret: String,
}

impl SessionAuth {
    /// Creates a middleware verifying tokens with the given shared secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            jwt_secret: self.jwt_secret.clone(),
        }))
    }
}

/// Session authentication middleware service
pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
    jwt_secret: String,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let jwt_secret = self.jwt_secret.clone();

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    return Err(ErrorUnauthorized("Missing or invalid Authorization header"));
                }
            };

            let auth_context = match verify_token(&token, &jwt_secret) {
                Ok(context) => context,
                Err(e) => return Err(ErrorUnauthorized(format!("Token verification failed: {e}"))),
            };

            req.extensions_mut().insert(auth_context);

            service.call(req).await
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Verify a provider-issued token with the shared secret
fn verify_token(token: &str, secret: &str) -> Result<AuthContext, String> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    // Provider tokens carry an audience we do not enforce here
    validation.validate_aud = false;

    let token_data = decode::<SessionClaims>(token, &decoding_key, &validation)
        .map_err(|e| format!("token decode error: {e}"))?;

    AuthContext::from_claims(token_data.claims)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
