//! # HTTP Identity Provider Adapter
//!
//! Production client for the hosted auth service. The endpoint shapes
//! follow the provider's password-grant API: `POST {base}/token` with
//! `grant_type=password`, `GET {base}/user` for token verification, and
//! `POST {base}/logout` for session invalidation.
//!
//! ## Error Handling
//!
//! HTTP errors are mapped to [`IdpError`] with diagnostic context: the
//! endpoint, HTTP status, and a response body excerpt. 401/403 answers on
//! sign-in and verification are the provider's "no" and map to
//! [`IdpError::InvalidCredentials`]; everything else is a fault.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::IdpError;
use crate::{AdminSession, AdminUser, IdentityProvider};

/// Configuration for the HTTP identity provider adapter.
#[derive(Clone)]
pub struct IdpConfig {
    /// Base URL of the provider's auth API
    /// (e.g. `https://project.example.co/auth/v1`).
    pub base_url: String,
    /// Project API key sent on every request.
    pub api_key: String,
    /// Per-request timeout in seconds (default: 10).
    pub timeout_secs: u64,
}

impl IdpConfig {
    /// Create a configuration with the default timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: 10,
        }
    }

    /// Build configuration from `IDP_URL` and `IDP_API_KEY`.
    ///
    /// Returns `Err` when either variable is absent — callers decide
    /// whether that means "fall back to static-token auth" or "fail".
    pub fn from_env() -> Result<Self, IdpError> {
        let base_url = std::env::var("IDP_URL")
            .map_err(|_| IdpError::Config("IDP_URL not set".to_string()))?;
        let api_key = std::env::var("IDP_API_KEY")
            .map_err(|_| IdpError::Config("IDP_API_KEY not set".to_string()))?;
        Ok(Self::new(base_url, api_key))
    }
}

impl std::fmt::Debug for IdpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdpConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// HTTP client adapter for the hosted identity provider.
#[derive(Debug)]
pub struct HttpIdp {
    client: reqwest::Client,
    base_url: String,
}

/// Wire shape of the provider's session response.
#[derive(Deserialize)]
struct SessionResponse {
    access_token: String,
    token_type: String,
    expires_in: u64,
    user: AdminUser,
}

impl HttpIdp {
    /// Create a new adapter from configuration.
    pub fn new(config: IdpConfig) -> Result<Self, IdpError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    "apikey",
                    reqwest::header::HeaderValue::from_str(&config.api_key)
                        .map_err(|_| IdpError::Config("invalid API key characters".into()))?,
                );
                headers.insert(
                    reqwest::header::CONTENT_TYPE,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .map_err(|e| IdpError::Config(format!("failed to build HTTP client: {e}")))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Send a request, mapping transport failures to [`IdpError::Unreachable`].
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<reqwest::Response, IdpError> {
        request.send().await.map_err(|source| IdpError::Unreachable {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// Read a non-2xx body excerpt for diagnostics.
    async fn unexpected(endpoint: &str, resp: reqwest::Response) -> IdpError {
        let status = resp.status().as_u16();
        let mut body = resp.text().await.unwrap_or_default();
        body.truncate(512);
        IdpError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            status,
            body,
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdp {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AdminSession, IdpError> {
        let endpoint = format!("{}/token?grant_type=password", self.base_url);
        let body = serde_json::json!({ "email": email, "password": password });

        let resp = self
            .send(self.client.post(&endpoint).json(&body), &endpoint)
            .await?;

        if resp.status().is_client_error() {
            return Err(IdpError::InvalidCredentials);
        }
        if !resp.status().is_success() {
            return Err(Self::unexpected(&endpoint, resp).await);
        }

        let session: SessionResponse =
            resp.json()
                .await
                .map_err(|source| IdpError::Unreachable {
                    endpoint: endpoint.clone(),
                    source,
                })?;

        Ok(AdminSession {
            access_token: session.access_token,
            token_type: session.token_type,
            expires_in: session.expires_in,
            user: session.user,
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdpError> {
        let endpoint = format!("{}/logout", self.base_url);
        let resp = self
            .send(
                self.client.post(&endpoint).bearer_auth(access_token),
                &endpoint,
            )
            .await?;

        if resp.status().is_success() {
            return Ok(());
        }
        if resp.status().as_u16() == 401 || resp.status().as_u16() == 403 {
            return Err(IdpError::InvalidCredentials);
        }
        Err(Self::unexpected(&endpoint, resp).await)
    }

    async fn verify_token(&self, access_token: &str) -> Result<AdminUser, IdpError> {
        let endpoint = format!("{}/user", self.base_url);
        let resp = self
            .send(
                self.client.get(&endpoint).bearer_auth(access_token),
                &endpoint,
            )
            .await?;

        if resp.status().as_u16() == 401 || resp.status().as_u16() == 403 {
            return Err(IdpError::InvalidCredentials);
        }
        if !resp.status().is_success() {
            return Err(Self::unexpected(&endpoint, resp).await);
        }

        resp.json().await.map_err(|source| IdpError::Unreachable {
            endpoint,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_debug_redacts_api_key() {
        let config = IdpConfig::new("https://auth.example", "very-secret-key");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret-key"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let idp = HttpIdp::new(IdpConfig::new("https://auth.example/", "key")).unwrap();
        assert_eq!(idp.base_url, "https://auth.example");
    }

    #[test]
    fn from_env_requires_both_variables() {
        // Neither variable is set in the test environment.
        std::env::remove_var("IDP_URL");
        std::env::remove_var("IDP_API_KEY");
        assert!(matches!(IdpConfig::from_env(), Err(IdpError::Config(_))));
    }
}
