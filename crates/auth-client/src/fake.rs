//! Simulated authentication API
//!
//! An in-source stand-in for the account service, used by tests and by
//! offline/demo wiring. It mirrors the error shapes of [`HttpAuthApi`] so
//! the screens cannot tell the two apart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::api::{AuthApi, AuthApiError, AuthUser, Result};

/// A registered account inside the fake service.
#[derive(Debug, Clone)]
struct FakeAccount {
    password: String,
    username: Option<String>,
}

/// Simulated [`AuthApi`] implementation.
///
/// Accounts are seeded with [`FakeAuthApi::with_user`] or created through
/// `register`. An optional artificial latency models the network round
/// trip; it defaults to zero so unit tests stay fast.
#[derive(Debug, Default)]
pub struct FakeAuthApi {
    accounts: Mutex<HashMap<String, FakeAccount>>,
    latency: Option<Duration>,
}

impl FakeAuthApi {
    /// Create an empty fake service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a known account.
    pub fn with_user(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        let email = email.into();
        let username = email.split('@').next().map(str::to_string);
        self.accounts.lock().unwrap().insert(
            email,
            FakeAccount { password: password.into(), username },
        );
        self
    }

    /// Add a simulated network round-trip delay.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn simulate_round_trip(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl AuthApi for FakeAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<AuthUser> {
        self.simulate_round_trip().await;

        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some(account) if account.password == password => Ok(AuthUser {
                email: email.to_string(),
                username: account.username.clone(),
            }),
            _ => Err(AuthApiError::InvalidCredentials),
        }
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> Result<AuthUser> {
        self.simulate_round_trip().await;

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(AuthApiError::Service(
                "An account with this email already exists".to_string(),
            ));
        }
        accounts.insert(
            email.to_string(),
            FakeAccount {
                password: password.to_string(),
                username: Some(username.to_string()),
            },
        );
        Ok(AuthUser {
            email: email.to_string(),
            username: Some(username.to_string()),
        })
    }

    async fn request_password_reset(&self, email: &str) -> Result<()> {
        self.simulate_round_trip().await;

        // The real service does not reveal whether the account exists
        let _ = email;
        Ok(())
    }
}
