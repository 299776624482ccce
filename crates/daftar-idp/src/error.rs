//! Identity provider error types.

/// Errors from identity provider calls.
#[derive(Debug, thiserror::Error)]
pub enum IdpError {
    /// The provider said no: wrong password, unknown user, or an invalid,
    /// expired, or revoked token. Expected during normal operation.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Transport failure reaching the provider.
    #[error("identity provider unreachable at {endpoint}: {source}")]
    Unreachable {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with something we cannot interpret.
    #[error("unexpected response from {endpoint}: HTTP {status}: {body}")]
    UnexpectedResponse {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The adapter is misconfigured or the operation is unavailable in
    /// this configuration (e.g. password sign-in on the static adapter).
    #[error("identity provider configuration error: {0}")]
    Config(String),
}
