//! Credential validation for Ledgeline
//!
//! This crate provides the field-level validation rules for the account
//! screens (login, registration, forgot-password) and the form aggregator
//! that turns them into a per-field error map. Validators are pure and
//! synchronous; an invalid field produces a message, never an error value
//! propagated through `Result`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod field;
pub mod form;

pub use field::{
    validate_confirm_password, validate_email, validate_password, validate_username, FieldError,
};
pub use form::{
    validate_login_form, validate_reset_email, validate_sign_in_form, Credentials, FormErrors,
    SignInCredentials,
};
