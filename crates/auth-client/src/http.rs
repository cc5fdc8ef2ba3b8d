//! HTTP implementation of the authentication API
//!
//! Talks JSON to the account service: `POST /auth/login`,
//! `POST /auth/register`, `POST /auth/reset-password`. Error responses are
//! expected to carry a `{ "message": "..." }` body; that message is what
//! the screens display.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::api::{AuthApi, AuthApiError, AuthUser, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`HttpAuthApi`]
#[derive(Debug, Clone)]
pub struct HttpAuthApiConfig {
    /// Service base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl HttpAuthApiConfig {
    /// Create a configuration for the given service URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: "ledgeline/0.1".to_string(),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ResetRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: AuthUser,
}

#[derive(Debug, Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// HTTP [`AuthApi`] implementation backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    /// Build a client from configuration.
    pub fn new(config: HttpAuthApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        tracing::debug!("Auth request to {} failed: {} {}", path, status, body.message);

        if status == reqwest::StatusCode::UNAUTHORIZED && body.message.is_empty() {
            return Err(AuthApiError::InvalidCredentials);
        }
        Err(AuthApiError::Service(body.message))
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<AuthUser> {
        let response = self
            .post_json("/auth/login", &LoginRequest { email, password })
            .await?;
        let envelope: UserEnvelope = response.json().await?;
        Ok(envelope.user)
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> Result<AuthUser> {
        let response = self
            .post_json(
                "/auth/register",
                &RegisterRequest { username, email, password },
            )
            .await?;
        let envelope: UserEnvelope = response.json().await?;
        Ok(envelope.user)
    }

    async fn request_password_reset(&self, email: &str) -> Result<()> {
        self.post_json("/auth/reset-password", &ResetRequest { email })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> HttpAuthApi {
        HttpAuthApi::new(HttpAuthApiConfig::new(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_login_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(serde_json::json!({
                "email": "alice@example.com",
                "password": "ValidPass123",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": { "email": "alice@example.com", "username": "alice_99" }
            })))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let user = api.login("alice@example.com", "ValidPass123").await.unwrap();
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.username.as_deref(), Some("alice_99"));
    }

    #[tokio::test]
    async fn test_login_rejection_surfaces_server_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Invalid email or password. Please try again."
            })))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let err = api.login("alice@example.com", "wrong").await.unwrap_err();
        assert_eq!(
            err.user_message(),
            "Invalid email or password. Please try again."
        );
    }

    #[tokio::test]
    async fn test_login_rejection_without_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let err = api.login("alice@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthApiError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_server_error_with_empty_message_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let err = api.login("alice@example.com", "ValidPass123").await.unwrap_err();
        assert_eq!(err.user_message(), "Something went wrong. Please try again.");
    }

    #[tokio::test]
    async fn test_network_failure_maps_to_network_error() {
        // Nothing is listening on this port
        let api = HttpAuthApi::new(
            HttpAuthApiConfig::new("http://127.0.0.1:9")
                .with_timeout(Duration::from_millis(250)),
        )
        .unwrap();

        let err = api.login("alice@example.com", "ValidPass123").await.unwrap_err();
        assert!(matches!(err, AuthApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_register_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": { "email": "bob@example.com", "username": "bob_7" }
            })))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let user = api
            .register("bob_7", "bob@example.com", "ValidPass123")
            .await
            .unwrap();
        assert_eq!(user.email, "bob@example.com");
    }

    #[tokio::test]
    async fn test_password_reset() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/reset-password"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let api = api_for(&server);
        api.request_password_reset("alice@example.com").await.unwrap();
    }
}
