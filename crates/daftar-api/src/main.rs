//! # daftar-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the IC registration service.
//! Binds to a configurable port (default 8080).

use std::sync::Arc;

use daftar_api::state::{AppConfig, AppState};
use daftar_idp::{HttpIdp, IdentityProvider, IdpConfig, StaticTokenIdp};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let auth_token = std::env::var("AUTH_TOKEN").ok().filter(|t| !t.is_empty());
    let config = AppConfig {
        port,
        auth_token: auth_token.clone(),
    };

    // Pick an identity provider: hosted HTTP provider if IDP_URL is set,
    // else the static-token adapter, else no auth at all (development).
    let idp: Option<Arc<dyn IdentityProvider>> = match IdpConfig::from_env() {
        Ok(idp_config) => {
            tracing::info!("Identity provider configured");
            Some(Arc::new(HttpIdp::new(idp_config)?))
        }
        Err(e) => match auth_token {
            Some(token) => {
                tracing::info!("Using static-token admin authentication");
                Some(Arc::new(StaticTokenIdp::new(token)))
            }
            None => {
                tracing::warn!(
                    "No identity provider configured: {e}. Admin endpoints are UNPROTECTED."
                );
                None
            }
        },
    };

    // Initialize database pool (optional — absent means in-memory only).
    let db_pool = daftar_api::db::init_pool().await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;

    let state = AppState::with_config(config, idp, db_pool);

    // Hydrate the in-memory store from the database (if connected).
    state.hydrate_from_db().await.map_err(|e| {
        tracing::error!("Database hydration failed: {e}");
        e
    })?;

    let app = daftar_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("daftar API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
