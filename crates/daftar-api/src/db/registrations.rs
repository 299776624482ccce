//! Queries against the `users_ic` table.
//!
//! Rows store the fingerprint as its hex encoding; decoding failures on
//! read are logged and the row skipped rather than failing the whole
//! load, so one corrupt row cannot take the service down.

use chrono::{DateTime, Utc};
use daftar_core::Fingerprint;
use sqlx::PgPool;
use uuid::Uuid;

use crate::state::RegistrationRecord;

use super::DbError;

/// Postgres error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, sqlx::FromRow)]
struct RegistrationRow {
    id: Uuid,
    hash_ic: String,
    full_name: String,
    created_at: DateTime<Utc>,
}

impl RegistrationRow {
    fn into_record(self) -> Option<RegistrationRecord> {
        match Fingerprint::from_hex(&self.hash_ic) {
            Ok(fingerprint) => Some(RegistrationRecord {
                id: self.id,
                fingerprint,
                full_name: self.full_name,
                created_at: self.created_at,
            }),
            Err(err) => {
                tracing::warn!(id = %self.id, error = %err, "skipping row with malformed fingerprint");
                None
            }
        }
    }
}

/// Insert a registration. A collision on the fingerprint column maps to
/// [`DbError::UniqueViolation`].
pub async fn insert(pool: &PgPool, record: &RegistrationRecord) -> Result<(), DbError> {
    let result = sqlx::query(
        "INSERT INTO users_ic (id, hash_ic, full_name, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(record.id)
    .bind(record.fingerprint.to_hex())
    .bind(&record.full_name)
    .bind(record.created_at)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            Err(DbError::UniqueViolation)
        }
        Err(err) => Err(DbError::Sqlx(err)),
    }
}

/// Look up a registration by fingerprint.
pub async fn get_by_fingerprint(
    pool: &PgPool,
    fingerprint: &Fingerprint,
) -> Result<Option<RegistrationRecord>, DbError> {
    let row: Option<RegistrationRow> = sqlx::query_as(
        "SELECT id, hash_ic, full_name, created_at FROM users_ic WHERE hash_ic = $1",
    )
    .bind(fingerprint.to_hex())
    .fetch_optional(pool)
    .await?;

    Ok(row.and_then(RegistrationRow::into_record))
}

/// Load every registration, newest first. Used to hydrate the in-memory
/// store on startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<RegistrationRecord>, sqlx::Error> {
    let rows: Vec<RegistrationRow> = sqlx::query_as(
        "SELECT id, hash_ic, full_name, created_at FROM users_ic ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().filter_map(RegistrationRow::into_record).collect())
}
