//! # Database Layer
//!
//! PostgreSQL persistence via sqlx. The database is optional: when
//! `DATABASE_URL` is unset the service runs entirely in memory, which is
//! how tests and local development operate.
//!
//! Migrations under `migrations/` are applied on startup with
//! `sqlx::migrate!`.

pub mod registrations;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

/// Storage errors distinguished enough for the API layer to map them:
/// a unique violation is a client-visible 409, everything else is a
/// server fault.
#[derive(Debug, Error)]
pub enum DbError {
    /// Insert collided with the unique constraint on the fingerprint
    /// column.
    #[error("fingerprint already registered")]
    UniqueViolation,

    /// Any other database failure.
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Connect to Postgres and run migrations, if `DATABASE_URL` is set.
///
/// Returns `Ok(None)` when the variable is absent so the caller can fall
/// back to in-memory operation.
pub async fn init_pool() -> Result<Option<PgPool>, DbError> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            tracing::warn!("DATABASE_URL not set; running without persistence");
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(sqlx::Error::from)?;

    tracing::info!("Connected to database and applied migrations");
    Ok(Some(pool))
}
