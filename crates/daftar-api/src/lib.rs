//! # daftar-api — IC Registration Service
//!
//! HTTP surface of the registration system. Public intake (submit and
//! OCR-assisted extraction), a bearer-protected admin console (listing,
//! search, CSV export), health probes, and an OpenAPI document.
//!
//! ## Router layout
//!
//! - `POST /api/register` — validated registration with duplicate
//!   detection over identity fingerprints
//! - `POST /api/register/extract` — field extraction from recognized
//!   card text
//! - `POST /api/admin/login` — credential exchange (public by nature)
//! - `POST /api/admin/logout`, `GET /api/admin/users`,
//!   `GET /api/admin/export-csv` — behind [`auth::auth_middleware`]
//! - `GET /health/liveness`, `GET /health/readiness`
//! - `GET /openapi.json`

pub mod auth;
pub mod csv;
pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Request bodies are small JSON documents; recognized card text is the
/// largest input and fits comfortably under this.
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Build the application router over the given state.
pub fn app(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/admin/logout", post(routes::admin::logout))
        .route("/api/admin/users", get(routes::admin::list_users))
        .route("/api/admin/export-csv", get(routes::admin::export_csv))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        .route("/api/register", post(routes::register::register))
        .route("/api/register/extract", post(routes::register::extract))
        .route("/api/admin/login", post(routes::admin::login))
        .merge(admin_routes)
        .route("/health/liveness", get(routes::health::liveness))
        .route("/health/readiness", get(routes::health::readiness))
        .route("/openapi.json", get(openapi::openapi_json))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
