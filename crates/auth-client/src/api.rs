//! The authentication API trait and its error/result types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the remote account service.
#[derive(Debug, Error)]
pub enum AuthApiError {
    /// The service rejected the credentials
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The service reported a failure with a message of its own
    #[error("{0}")]
    Service(String),

    /// Transport-level failure (connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// A response body could not be decoded
    #[error("Malformed response from server")]
    Malformed,
}

impl AuthApiError {
    /// The message to surface on the form.
    ///
    /// Service-provided messages are passed through verbatim; a failure
    /// that carries no useful message falls back to a generic string.
    pub fn user_message(&self) -> String {
        match self {
            AuthApiError::Service(message) if message.is_empty() => {
                "Something went wrong. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for AuthApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AuthApiError::Malformed
        } else {
            AuthApiError::Network(err.to_string())
        }
    }
}

/// Result type for authentication API calls
pub type Result<T> = std::result::Result<T, AuthApiError>;

/// Minimal profile returned by the account service on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Email address the account was authenticated with
    pub email: String,
    /// Username, when the service knows one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// The remote account service.
///
/// All methods are single round trips; retries and timeouts belong to the
/// implementation, not the caller.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Authenticate with email and password.
    async fn login(&self, email: &str, password: &str) -> Result<AuthUser>;

    /// Create an account and authenticate it.
    async fn register(&self, username: &str, email: &str, password: &str) -> Result<AuthUser>;

    /// Ask the service to send a password reset email.
    async fn request_password_reset(&self, email: &str) -> Result<()>;
}
