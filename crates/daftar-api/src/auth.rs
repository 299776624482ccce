//! # Admin Authentication Middleware
//!
//! Bearer-token middleware protecting the admin router. Tokens are
//! verified against the configured [`IdentityProvider`]; the verified
//! identity is attached to the request as an [`AdminIdentity`] extension
//! so handlers (notably logout) can reuse the caller's token.
//!
//! When no provider is configured the middleware runs in development
//! mode: every request passes with a synthetic identity. The server logs
//! a prominent warning at startup in that configuration.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use daftar_idp::{AdminUser, IdentityProvider, IdpError};

use crate::error::AppError;
use crate::state::AppState;

/// The authenticated admin attached to requests that passed the
/// middleware. Carries the presented token so sign-out can forward it
/// to the provider.
#[derive(Clone)]
pub struct AdminIdentity {
    pub user: AdminUser,
    pub access_token: String,
}

impl std::fmt::Debug for AdminIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminIdentity")
            .field("user", &self.user)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminIdentity>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("authentication required".to_string()))
    }
}

/// Pull the bearer token out of the `Authorization` header.
fn bearer_token(request: &Request) -> Result<&str, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("missing Authorization header".to_string()))?;

    let value = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("malformed Authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("expected Bearer authentication".to_string()))
}

/// Middleware guarding all admin routes except login.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = match &state.idp {
        Some(idp) => {
            let token = bearer_token(&request)?;
            verify_request(idp, token).await?
        }
        None => AdminIdentity {
            user: AdminUser {
                id: Uuid::nil(),
                email: "dev@localhost".to_string(),
            },
            access_token: String::new(),
        },
    };

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

async fn verify_request(
    idp: &Arc<dyn IdentityProvider>,
    token: &str,
) -> Result<AdminIdentity, AppError> {
    let user = idp.verify_token(token).await.map_err(|err| match err {
        IdpError::InvalidCredentials => {
            AppError::Unauthorized("invalid or expired token".to_string())
        }
        other => AppError::from(other),
    })?;

    Ok(AdminIdentity {
        user,
        access_token: token.to_string(),
    })
}
