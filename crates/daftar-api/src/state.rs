//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The registration store is in-memory and keyed by fingerprint, so the
//! uniqueness invariant is enforced under a single write lock. When a
//! database pool is configured, writes go through to Postgres (where the
//! `UNIQUE` constraint on `hash_ic` is the source of truth under
//! concurrency) and the store is hydrated from it on startup.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use daftar_core::Fingerprint;
use daftar_idp::IdentityProvider;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

/// A persisted registration.
///
/// Immutable once created: there is no update or delete surface anywhere
/// in the API. The raw IC number is not part of this record — only its
/// fingerprint survives intake.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    /// Opaque unique identifier, generated at creation.
    pub id: Uuid,
    /// One-way SHA-256 fingerprint of the IC number. Unique across all
    /// records.
    #[serde(rename = "hashIc")]
    #[schema(value_type = String)]
    pub fingerprint: Fingerprint,
    /// Uppercase-normalized full name.
    pub full_name: String,
    /// Creation timestamp; default sort key (newest first).
    pub created_at: DateTime<Utc>,
}

/// Thread-safe in-memory registration store, keyed by fingerprint hex.
///
/// The lock is `parking_lot`, not `tokio::sync` — it is never held across
/// an `.await` point, and `parking_lot::RwLock` is non-poisonable.
#[derive(Debug, Default)]
pub struct RegistrationStore {
    data: Arc<RwLock<HashMap<String, RegistrationRecord>>>,
}

impl Clone for RegistrationStore {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl RegistrationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record only if its fingerprint is not yet present.
    ///
    /// The check and the insert run under one write lock, so concurrent
    /// duplicate submissions cannot both succeed in memory. Returns
    /// `false` when the fingerprint was already registered.
    pub fn insert_unique(&self, record: RegistrationRecord) -> bool {
        let key = record.fingerprint.to_hex();
        let mut guard = self.data.write();
        if guard.contains_key(&key) {
            return false;
        }
        guard.insert(key, record);
        true
    }

    /// Remove a record by fingerprint. Used to roll back an in-memory
    /// insert whose database write-through failed.
    pub fn remove(&self, fingerprint: &Fingerprint) -> Option<RegistrationRecord> {
        self.data.write().remove(&fingerprint.to_hex())
    }

    /// Look up a record by fingerprint.
    pub fn get_by_fingerprint(&self, fingerprint: &Fingerprint) -> Option<RegistrationRecord> {
        self.data.read().get(&fingerprint.to_hex()).cloned()
    }

    /// All records, newest first.
    pub fn list_newest_first(&self) -> Vec<RegistrationRecord> {
        let mut records: Vec<RegistrationRecord> = self.data.read().values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        records
    }

    /// Records whose name contains the given term, newest first.
    ///
    /// The term is uppercased caller-side convention-free: this method
    /// uppercases it itself, since stored names are always uppercase.
    pub fn search(&self, term: &str) -> Vec<RegistrationRecord> {
        let needle = term.trim().to_ascii_uppercase();
        self.list_newest_first()
            .into_iter()
            .filter(|r| r.full_name.contains(&needle))
            .collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Application configuration.
///
/// Custom `Debug` redacts the static auth token to prevent credential
/// leakage in logs.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Static bearer token for provider-less deployments.
    pub auth_token: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_token: None,
        }
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly: the store shares its map via `Arc`, the pool and the
/// provider are reference-counted handles.
#[derive(Debug, Clone)]
pub struct AppState {
    /// In-memory registration store (hydrated from Postgres on startup
    /// when a pool is configured).
    pub registrations: RegistrationStore,
    /// PostgreSQL pool for durable persistence. `None` means in-memory
    /// only (development and tests).
    pub db_pool: Option<PgPool>,
    /// External identity provider for admin authentication. `None`
    /// disables admin auth entirely (development mode).
    pub idp: Option<Arc<dyn IdentityProvider>>,
    /// Application configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Create a state with default configuration, no database, no provider.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None, None)
    }

    /// Create a state with the given configuration and collaborators.
    pub fn with_config(
        config: AppConfig,
        idp: Option<Arc<dyn IdentityProvider>>,
        db_pool: Option<PgPool>,
    ) -> Self {
        Self {
            registrations: RegistrationStore::new(),
            db_pool,
            idp,
            config,
        }
    }

    /// Hydrate the in-memory store from the database.
    ///
    /// Called once on startup when a pool is available, so reads stay
    /// fast and synchronous afterwards.
    pub async fn hydrate_from_db(&self) -> Result<(), sqlx::Error> {
        let pool = match &self.db_pool {
            Some(pool) => pool,
            None => return Ok(()),
        };

        let records = crate::db::registrations::load_all(pool).await?;
        let count = records.len();
        for record in records {
            self.registrations.insert_unique(record);
        }
        tracing::info!(registrations = count, "Hydrated registration store from database");
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
