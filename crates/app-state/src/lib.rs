//! Application state for the Ledgeline authentication flow
//!
//! This crate owns the two state machines at the heart of the account
//! flow: the process-wide session state (bootstrapping → signed in / out)
//! and the screen routing state (login / register / forgot-password /
//! home), plus the form controllers that sit between the screens and the
//! validation + network collaborators.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod forms;
pub mod screen;
pub mod session;

pub use forms::{ForgotPasswordForm, LoginForm, RegistrationForm, SignInForm};
pub use screen::{FlowObserver, Screen, ScreenFlow};
pub use session::{SessionError, SessionManager, SessionState, UserProfile};
