//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from daftar-core and provider errors from daftar-idp
//! to HTTP status codes with a JSON error body. Internal and upstream
//! error detail is logged server-side, never returned to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use daftar_core::ValidationErrors;
use daftar_idp::IdpError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "VALIDATION_ERROR", "DUPLICATE").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Field → message mapping, present only for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Registration field validation failed (400). Carries the full
    /// field → message mapping for the client form.
    #[error("validation error: {0}")]
    Validation(ValidationErrors),

    /// Request body could not be parsed or a single input was malformed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authentication failure — missing, malformed, or rejected credential (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The identity fingerprint is already registered (409). The message
    /// is client-facing and goes out verbatim.
    #[error("{0}")]
    Duplicate(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),

    /// Identity provider or storage collaborator failed (502).
    /// Message is logged but not returned.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// A required collaborator is not configured (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Duplicate(_) => (StatusCode::CONFLICT, "DUPLICATE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal/upstream error messages to clients.
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Upstream(_) => "An upstream service error occurred".to_string(),
            other => other.to_string(),
        };

        // Log server-side errors for operator visibility.
        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Upstream(_) => tracing::error!(error = %self, "upstream service error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            _ => {}
        }

        let details = match &self {
            Self::Validation(errors) => {
                let map: serde_json::Map<String, serde_json::Value> = errors
                    .iter()
                    .map(|e| {
                        (
                            e.field.as_str().to_string(),
                            serde_json::Value::String(e.message.clone()),
                        )
                    })
                    .collect();
                Some(serde_json::Value::Object(map))
            }
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Provider errors: a rejected credential is the expected 401; a
/// misconfigured adapter is 503; everything else is an upstream fault.
impl From<IdpError> for AppError {
    fn from(err: IdpError) -> Self {
        match err {
            IdpError::InvalidCredentials => Self::Unauthorized("invalid credentials".to_string()),
            IdpError::Config(msg) => Self::ServiceUnavailable(msg),
            other => Self::Upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daftar_core::{Field, FieldError};

    #[test]
    fn validation_maps_to_400_with_details() {
        let err = AppError::Validation(ValidationErrors(vec![FieldError::new(
            Field::IcNumber,
            "IC Number must be exactly 12 digits",
        )]));
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn duplicate_maps_to_409() {
        let err = AppError::Duplicate("IC telah didaftar".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "DUPLICATE");
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let err = AppError::Unauthorized("no token".to_string());
        assert_eq!(err.status_and_code().0, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn upstream_maps_to_502() {
        let err = AppError::Upstream("provider timed out".to_string());
        assert_eq!(err.status_and_code().0, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn invalid_credentials_becomes_unauthorized() {
        let err = AppError::from(IdpError::InvalidCredentials);
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn idp_config_error_becomes_service_unavailable() {
        let err = AppError::from(IdpError::Config("IDP_URL not set".to_string()));
        assert!(matches!(err, AppError::ServiceUnavailable(_)));
    }
}
