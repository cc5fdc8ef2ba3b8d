//! Session state machine
//!
//! The process-wide authentication state. It starts at `Bootstrapping`,
//! resolves exactly once to signed in or signed out after the persisted
//! session check, and thereafter moves only on confirmed login success or
//! explicit logout. An ambiguous or erroring persisted read never grants
//! access.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::SessionStore;
use thiserror::Error;
use tokio::sync::RwLock;

/// Key the session flag is persisted under.
pub const SESSION_KEY: &str = "auth:session";

/// Sentinel value meaning "a session exists".
pub const SESSION_ACTIVE: &str = "true";

/// Key the signed-in profile is persisted under.
pub const PROFILE_KEY: &str = "auth:profile";

/// Session state errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Persisted store error
    #[error("Storage error: {0}")]
    Store(#[from] storage::StoreError),

    /// Profile serialization error
    #[error("Profile serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Process-wide authentication state.
///
/// `Bootstrapping` is the only initial state and is never re-entered; the
/// UI shows its loading indicator exactly while this state holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// The persisted session check has not resolved yet
    Bootstrapping,
    /// No session; the login flow is shown
    Unauthenticated,
    /// A session exists; the authenticated area is shown
    Authenticated,
}

/// Minimal profile stored alongside the session flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Email address the session was established with
    pub email: String,
    /// Username, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Owner of the session state machine.
///
/// Created fresh on every process start; no session state survives a
/// restart except the persisted flag itself.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    state: RwLock<SessionState>,
}

impl SessionManager {
    /// Create a manager in the `Bootstrapping` state.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            state: RwLock::new(SessionState::Bootstrapping),
        }
    }

    /// Current state.
    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    /// True once a login has been established.
    pub async fn is_authenticated(&self) -> bool {
        self.state().await == SessionState::Authenticated
    }

    /// True while the startup session check is still outstanding.
    pub async fn is_bootstrapping(&self) -> bool {
        self.state().await == SessionState::Bootstrapping
    }

    /// Resolve the persisted session check.
    ///
    /// Reads the session flag once at startup. Only the exact
    /// [`SESSION_ACTIVE`] sentinel grants `Authenticated`; a missing key,
    /// any other value, or a store error resolves to `Unauthenticated`
    /// (the error is logged, never surfaced). Calling this after the
    /// state has already resolved returns the current state unchanged.
    pub async fn bootstrap(&self) -> SessionState {
        {
            let state = self.state.read().await;
            if *state != SessionState::Bootstrapping {
                return *state;
            }
        }

        let resolved = match self.store.get(SESSION_KEY).await {
            Ok(Some(value)) if value == SESSION_ACTIVE => SessionState::Authenticated,
            Ok(_) => SessionState::Unauthenticated,
            Err(err) => {
                tracing::warn!("Session check failed, treating as signed out: {err}");
                SessionState::Unauthenticated
            }
        };

        let mut state = self.state.write().await;
        if *state == SessionState::Bootstrapping {
            *state = resolved;
        }
        *state
    }

    /// Record a confirmed login: persist the profile and flag, then
    /// transition to `Authenticated`.
    ///
    /// The flag is written last. A failure part way through must not leave
    /// a persisted flag behind, or the next startup would bootstrap into a
    /// session the user was told failed.
    pub async fn complete_login(&self, profile: &UserProfile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.store.set(PROFILE_KEY, &json).await?;

        if let Err(err) = self.store.set(SESSION_KEY, SESSION_ACTIVE).await {
            if let Err(cleanup) = self.store.remove(PROFILE_KEY).await {
                tracing::warn!("Failed to remove profile after partial login persist: {cleanup}");
            }
            return Err(err.into());
        }

        *self.state.write().await = SessionState::Authenticated;
        tracing::debug!("Session established for {}", profile.email);
        Ok(())
    }

    /// Remove the persisted session and transition to `Unauthenticated`.
    ///
    /// The transition happens even when the store fails: a signed-out
    /// state that could not be fully persisted is still signed out from
    /// this process's point of view.
    pub async fn logout(&self) {
        if let Err(err) = self.store.remove(PROFILE_KEY).await {
            tracing::warn!("Failed to remove stored profile: {err}");
        }
        if let Err(err) = self.store.remove(SESSION_KEY).await {
            tracing::warn!("Failed to remove session flag: {err}");
        }
        *self.state.write().await = SessionState::Unauthenticated;
    }

    /// The stored profile, if a readable one exists.
    pub async fn profile(&self) -> Option<UserProfile> {
        let json = match self.store.get(PROFILE_KEY).await {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!("Failed to read stored profile: {err}");
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(profile) => Some(profile),
            Err(err) => {
                tracing::warn!("Stored profile is unreadable: {err}");
                None
            }
        }
    }
}
