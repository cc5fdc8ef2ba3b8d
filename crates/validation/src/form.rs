//! Form-level validation
//!
//! The aggregators run every field validator independently (no
//! short-circuiting across fields) and collect the failures into a
//! [`FormErrors`] map. An empty map is the only green light for a
//! submission to proceed to the network collaborator.

use serde::{Deserialize, Serialize};

use crate::field::{
    validate_confirm_password, validate_email, validate_password, validate_username, FieldError,
};

/// Credentials for the combined login/registration form.
///
/// Created fresh per submission attempt and owned by the form instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Desired username
    pub username: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Password confirmation
    pub confirm_password: String,
}

/// Credentials for the sign-in-only form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInCredentials {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

/// Per-field error map for a form.
///
/// A field slot is `Some` only when the corresponding value currently fails
/// its rule; `None` means the field is valid. The `form` slot carries an
/// error not attributable to a single field, such as a rejected remote
/// login.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    /// Username error, if any
    pub username: Option<FieldError>,
    /// Email error, if any
    pub email: Option<FieldError>,
    /// Password error, if any
    pub password: Option<FieldError>,
    /// Password confirmation error, if any
    pub confirm_password: Option<FieldError>,
    /// Form-level error message, if any
    pub form: Option<String>,
}

impl FormErrors {
    /// True when no field or form-level error is present.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
            && self.form.is_none()
    }

    /// Number of slots currently in error (the `form` slot included).
    pub fn len(&self) -> usize {
        [
            self.username.is_some(),
            self.email.is_some(),
            self.password.is_some(),
            self.confirm_password.is_some(),
            self.form.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// Drop all errors.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Validate the combined login/registration form.
///
/// Every field is checked even when an earlier one already failed, so the
/// user sees all problems at once. Returns an empty map when all four
/// fields are valid.
pub fn validate_login_form(credentials: &Credentials) -> FormErrors {
    FormErrors {
        username: validate_username(&credentials.username),
        email: validate_email(&credentials.email),
        password: validate_password(&credentials.password),
        confirm_password: validate_confirm_password(
            &credentials.password,
            &credentials.confirm_password,
        ),
        form: None,
    }
}

/// Validate the sign-in-only form (email and password).
pub fn validate_sign_in_form(credentials: &SignInCredentials) -> FormErrors {
    FormErrors {
        email: validate_email(&credentials.email),
        password: validate_password(&credentials.password),
        ..FormErrors::default()
    }
}

/// Validate the forgot-password form (email only).
pub fn validate_reset_email(email: &str) -> FormErrors {
    FormErrors {
        email: validate_email(email),
        ..FormErrors::default()
    }
}
