//! # Static-Token Adapter
//!
//! Verifies a single configured bearer secret, for deployments and tests
//! that run without the hosted identity provider. Password sign-in is not
//! available here — the operator hands the secret out of band.

use async_trait::async_trait;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::error::IdpError;
use crate::{AdminSession, AdminUser, IdentityProvider};

/// Identity provider backed by one static bearer secret.
pub struct StaticTokenIdp {
    secret: String,
    user: AdminUser,
}

impl StaticTokenIdp {
    /// Create an adapter for the given secret.
    ///
    /// The admin identity is synthesized once at construction; every
    /// verified request sees the same opaque user.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            user: AdminUser {
                id: Uuid::new_v4(),
                email: "admin@local".to_string(),
            },
        }
    }
}

impl std::fmt::Debug for StaticTokenIdp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenIdp")
            .field("secret", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// Constant-time comparison of bearer tokens.
///
/// When lengths differ, performs a dummy comparison to avoid leaking
/// length information through timing variance.
fn constant_time_token_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

#[async_trait]
impl IdentityProvider for StaticTokenIdp {
    async fn sign_in(&self, _email: &str, _password: &str) -> Result<AdminSession, IdpError> {
        Err(IdpError::Config(
            "password sign-in requires a configured identity provider".to_string(),
        ))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), IdpError> {
        // Static tokens have no server-side session to invalidate.
        Ok(())
    }

    async fn verify_token(&self, access_token: &str) -> Result<AdminUser, IdpError> {
        if constant_time_token_eq(access_token, &self.secret) {
            Ok(self.user.clone())
        } else {
            Err(IdpError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn correct_token_verifies() {
        let idp = StaticTokenIdp::new("my-secret");
        let user = idp.verify_token("my-secret").await.unwrap();
        assert_eq!(user.email, "admin@local");
    }

    #[tokio::test]
    async fn wrong_token_is_rejected() {
        let idp = StaticTokenIdp::new("my-secret");
        assert!(matches!(
            idp.verify_token("wrong").await,
            Err(IdpError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn prefix_of_token_is_rejected() {
        let idp = StaticTokenIdp::new("my-secret-token");
        assert!(idp.verify_token("my-secret").await.is_err());
    }

    #[tokio::test]
    async fn sign_in_is_unavailable() {
        let idp = StaticTokenIdp::new("my-secret");
        assert!(matches!(
            idp.sign_in("a@b.c", "pw").await,
            Err(IdpError::Config(_))
        ));
    }

    #[tokio::test]
    async fn sign_out_is_a_no_op() {
        let idp = StaticTokenIdp::new("my-secret");
        assert!(idp.sign_out("anything").await.is_ok());
    }

    #[test]
    fn constant_time_eq_identical_tokens() {
        assert!(constant_time_token_eq("secret-token-123", "secret-token-123"));
    }

    #[test]
    fn constant_time_eq_rejects_empty() {
        assert!(!constant_time_token_eq("", "secret-token-123"));
    }

    #[test]
    fn debug_redacts_secret() {
        let idp = StaticTokenIdp::new("hunter2");
        assert!(!format!("{idp:?}").contains("hunter2"));
    }
}
