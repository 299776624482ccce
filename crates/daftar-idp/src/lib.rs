//! # daftar-idp — Identity Provider Client
//!
//! Typed client for the hosted authentication service that issues and
//! verifies admin credentials. The registration service trusts exactly two
//! things from the provider: a yes/no verification result and an opaque
//! admin identity — nothing more.
//!
//! ## Adapters
//!
//! - [`HttpIdp`] — production adapter speaking the provider's HTTP API
//!   (password grant, logout, user lookup) over `reqwest`.
//! - [`StaticTokenIdp`] — development/test adapter that verifies a single
//!   configured bearer secret in constant time. Password sign-in is not
//!   available in this mode.
//!
//! Both implement the [`IdentityProvider`] trait, which the API crate
//! consumes behind `Arc<dyn IdentityProvider>`.

pub mod error;
pub mod http;
pub mod static_token;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use error::IdpError;
pub use http::{HttpIdp, IdpConfig};
pub use static_token::StaticTokenIdp;

/// The opaque admin identity returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    /// Provider-assigned user ID.
    pub id: Uuid,
    /// Sign-in email, echoed for display in the admin console.
    pub email: String,
}

/// A session minted by password sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    /// Bearer credential to present on subsequent admin requests.
    pub access_token: String,
    /// Token type, always `bearer` from the hosted provider.
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
    /// The authenticated admin.
    pub user: AdminUser,
}

/// External identity provider operations the service depends on.
///
/// Failure semantics: [`IdpError::InvalidCredentials`] is the expected
/// "no" answer; everything else is a provider/transport fault that the
/// API layer surfaces as a generic server error.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug {
    /// Exchange email + password for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AdminSession, IdpError>;

    /// Invalidate the session behind the given bearer token.
    async fn sign_out(&self, access_token: &str) -> Result<(), IdpError>;

    /// Verify a bearer token, returning the admin it belongs to.
    async fn verify_token(&self, access_token: &str) -> Result<AdminUser, IdpError>;
}
