//! Admin console endpoints.
//!
//! Login is public (it is how a token is obtained); everything else in
//! this module sits behind the bearer middleware and receives the
//! verified [`AdminIdentity`].

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use daftar_idp::{AdminUser, IdpError};

use crate::auth::AdminIdentity;
use crate::csv::render_csv;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::{AppState, RegistrationRecord};

const EXPORT_FILENAME: &str = "ic-registrations.csv";

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err("email and password are required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(value_type = Object)]
    pub user: AdminUser,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Exchange admin credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session created", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Credentials rejected"),
        (status = 503, description = "No identity provider configured"),
    ),
    tag = "admin"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let request = extract_validated_json(payload)?;

    let idp = state.idp.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("no identity provider configured".to_string())
    })?;

    let session = idp
        .sign_in(request.email.trim(), &request.password)
        .await
        .map_err(|err| match err {
            IdpError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".to_string())
            }
            other => AppError::from(other),
        })?;

    tracing::info!(email = %session.user.email, "admin signed in");

    Ok(Json(LoginResponse {
        user: session.user,
        access_token: session.access_token,
        token_type: session.token_type,
        expires_in: session.expires_in,
    }))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

/// Invalidate the caller's session at the provider.
#[utoipa::path(
    post,
    path = "/api/admin/logout",
    responses(
        (status = 200, description = "Session invalidated", body = LogoutResponse),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn logout(
    State(state): State<AppState>,
    identity: AdminIdentity,
) -> Result<Json<LogoutResponse>, AppError> {
    if let Some(idp) = &state.idp {
        idp.sign_out(&identity.access_token).await?;
    }

    tracing::info!(email = %identity.user.email, "admin signed out");

    Ok(Json(LogoutResponse {
        success: true,
        message: "Logged out".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    /// Case-insensitive substring filter on the full name.
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<RegistrationRecord>,
    pub total: usize,
}

/// List registrations, newest first, optionally filtered by name.
#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(("search" = Option<String>, Query, description = "Name substring filter")),
    responses(
        (status = 200, description = "Registrations", body = UsersResponse),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Json<UsersResponse> {
    let users = match query.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => state.registrations.search(term),
        _ => state.registrations.list_newest_first(),
    };
    let total = users.len();
    Json(UsersResponse { users, total })
}

/// Export all registrations as a CSV attachment.
#[utoipa::path(
    get,
    path = "/api/admin/export-csv",
    responses(
        (status = 200, description = "CSV document", content_type = "text/csv"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn export_csv(State(state): State<AppState>) -> impl IntoResponse {
    let records = state.registrations.list_newest_first();
    let body = render_csv(&records);

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        body,
    )
}
