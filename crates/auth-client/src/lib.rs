//! Network authentication client for Ledgeline
//!
//! The screens talk to the remote account service through the [`AuthApi`]
//! trait. Two implementations are provided: [`HttpAuthApi`] for the real
//! service and [`FakeAuthApi`], an in-source simulated service for tests
//! and offline development. Which one a screen gets is a wiring decision,
//! never an environment branch inside the flow itself.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod fake;
pub mod http;

pub use api::{AuthApi, AuthApiError, AuthUser, Result};
pub use fake::FakeAuthApi;
pub use http::{HttpAuthApi, HttpAuthApiConfig};
