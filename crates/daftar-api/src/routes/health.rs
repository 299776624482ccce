//! Health probes.
//!
//! Liveness answers as long as the process serves requests. Readiness
//! additionally pings the database when one is configured; without a
//! pool the service is ready as soon as it is up.

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

pub async fn liveness(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "registrations": state.registrations.len(),
    }))
}

pub async fn readiness(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(pool) = &state.db_pool {
        sqlx::query("SELECT 1")
            .execute(pool)
            .await
            .map_err(|err| AppError::ServiceUnavailable(format!("database not ready: {err}")))?;
    }

    Ok(Json(json!({ "status": "ready" })))
}
