//! Public registration intake.
//!
//! Two endpoints: the registration submit itself, and the OCR text
//! extraction helper the intake form calls after scanning a card. The
//! raw IC number exists only inside the request scope; what gets stored
//! and echoed back never includes it.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use daftar_core::{extract_fields, validate_registration, ExtractionError, Fingerprint};

use crate::db::{self, DbError};
use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_json, Validate};
use crate::state::{AppState, RegistrationRecord};

/// Message returned when the fingerprint is already registered.
const DUPLICATE_MESSAGE: &str = "IC telah didaftar";
/// Message returned on successful registration.
const SUCCESS_MESSAGE: &str = "Berjaya didaftar";

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Raw IC number as typed or extracted; must be exactly 12 digits.
    pub ic_number: String,
    /// Full name as typed or extracted.
    pub full_name: String,
}

/// Public view of a created registration. Deliberately excludes the
/// fingerprint: the submitter has no use for it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: Uuid,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: RegisteredUser,
}

/// Register an identity.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = RegisterResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "IC already registered"),
    ),
    tag = "register"
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let request = extract_json(payload)?;

    let (ic_number, full_name) = validate_registration(&request.ic_number, &request.full_name)?;
    let fingerprint = Fingerprint::of(&ic_number);

    // Fast-path rejection before allocating a record. The authoritative
    // check is the atomic insert below.
    if state.registrations.get_by_fingerprint(&fingerprint).is_some() {
        return Err(AppError::Duplicate(DUPLICATE_MESSAGE.to_string()));
    }

    let record = RegistrationRecord {
        id: Uuid::new_v4(),
        fingerprint,
        full_name: full_name.to_string(),
        created_at: Utc::now(),
    };

    if !state.registrations.insert_unique(record.clone()) {
        return Err(AppError::Duplicate(DUPLICATE_MESSAGE.to_string()));
    }

    // Write-through. On failure the in-memory insert is rolled back so
    // store and database cannot disagree about what exists.
    if let Some(pool) = &state.db_pool {
        match db::registrations::insert(pool, &record).await {
            Ok(()) => {}
            Err(DbError::UniqueViolation) => {
                state.registrations.remove(&record.fingerprint);
                return Err(AppError::Duplicate(DUPLICATE_MESSAGE.to_string()));
            }
            Err(DbError::Sqlx(err)) => {
                state.registrations.remove(&record.fingerprint);
                return Err(AppError::Internal(format!(
                    "failed to persist registration: {err}"
                )));
            }
        }
    }

    tracing::info!(id = %record.id, "registration created");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            user: RegisteredUser {
                id: record.id,
                full_name: record.full_name,
                created_at: record.created_at,
            },
        }),
    ))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtractRequest {
    /// Recognized text of a scanned IC, one line per detected text block.
    pub text: String,
}

impl Validate for ExtractRequest {
    fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("text must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub extracted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ic_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Extract IC number and name from recognized card text.
///
/// Extraction is all-or-nothing: a response with `extracted: false`
/// carries neither field, only the reason, so the form never pre-fills
/// half a card.
#[utoipa::path(
    post,
    path = "/api/register/extract",
    request_body = ExtractRequest,
    responses(
        (status = 200, description = "Extraction outcome", body = ExtractResponse),
        (status = 400, description = "Empty or malformed body"),
    ),
    tag = "register"
)]
pub async fn extract(
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>, AppError> {
    let request = extract_validated_json(payload)?;

    let response = match extract_fields(&request.text) {
        Ok(extraction) => ExtractResponse {
            extracted: true,
            ic_number: Some(extraction.ic_number.to_string()),
            full_name: Some(extraction.full_name.to_string()),
            reason: None,
        },
        Err(err) => {
            let reason = match err {
                ExtractionError::NoIcNumber => "no IC number found in text",
                ExtractionError::NoName => "no name found in text",
            };
            ExtractResponse {
                extracted: false,
                ic_number: None,
                full_name: None,
                reason: Some(reason.to_string()),
            }
        }
    };

    Ok(Json(response))
}
