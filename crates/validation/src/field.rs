//! Field-level validation rules
//!
//! Each validator is a pure function from a field value to an optional
//! [`FieldError`]. Checks within a field run in a fixed order and the first
//! failing check wins, so a field carries at most one message at a time.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// A single field's validation failure.
///
/// The `Display` implementation is the user-facing message shown inline
/// under the field. Validators return `None` for a valid value; they never
/// return an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Username field left empty (after trimming)
    #[error("Username is required")]
    UsernameRequired,

    /// Username outside the 3-20 character range
    #[error("Username must be 3-20 characters")]
    UsernameLength,

    /// Username contains characters outside `[A-Za-z0-9_]`
    #[error("Username must contain only letters, numbers, and underscores")]
    UsernameCharset,

    /// Email field left empty
    #[error("Email is required")]
    EmailRequired,

    /// Email does not match the `local@domain.tld` shape
    #[error("Email must be a valid email")]
    EmailInvalid,

    /// Password field left empty
    #[error("Password is required")]
    PasswordRequired,

    /// Password shorter than 8 characters
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    /// Password has no uppercase letter
    #[error("Password must contain an uppercase letter")]
    PasswordNoUppercase,

    /// Password has no digit
    #[error("Password must contain at least one number")]
    PasswordNoDigit,

    /// Confirmation field left empty
    #[error("Please confirm your password")]
    ConfirmPasswordRequired,

    /// Confirmation does not match the password exactly
    #[error("Passwords do not match")]
    PasswordMismatch,
}

fn username_regex() -> &'static Regex {
    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    USERNAME_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap())
}

fn email_regex() -> &'static Regex {
    // Permissive local@domain.tld shape: exactly one '@', non-empty local
    // part, dot-separated domain with non-empty labels. Subdomains accepted.
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").unwrap())
}

/// Validate a username.
///
/// Checks, in order: required (trimmed), length 3-20, charset
/// `[A-Za-z0-9_]`.
pub fn validate_username(value: &str) -> Option<FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(FieldError::UsernameRequired);
    }
    let len = trimmed.chars().count();
    if !(3..=20).contains(&len) {
        return Some(FieldError::UsernameLength);
    }
    if !username_regex().is_match(trimmed) {
        return Some(FieldError::UsernameCharset);
    }
    None
}

/// Validate an email address against the permissive `local@domain.tld`
/// shape.
pub fn validate_email(value: &str) -> Option<FieldError> {
    if value.is_empty() {
        return Some(FieldError::EmailRequired);
    }
    if !email_regex().is_match(value) {
        return Some(FieldError::EmailInvalid);
    }
    None
}

/// Validate a password.
///
/// Checks, in order: required, minimum length 8, at least one uppercase
/// letter, at least one digit. Special characters are permitted but never
/// required.
pub fn validate_password(value: &str) -> Option<FieldError> {
    if value.is_empty() {
        return Some(FieldError::PasswordRequired);
    }
    if value.chars().count() < 8 {
        return Some(FieldError::PasswordTooShort);
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Some(FieldError::PasswordNoUppercase);
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Some(FieldError::PasswordNoDigit);
    }
    None
}

/// Validate the password confirmation against the password.
///
/// Exact string equality; an empty confirmation is reported as missing
/// rather than mismatched.
pub fn validate_confirm_password(password: &str, confirm: &str) -> Option<FieldError> {
    if confirm.is_empty() {
        return Some(FieldError::ConfirmPasswordRequired);
    }
    if confirm != password {
        return Some(FieldError::PasswordMismatch);
    }
    None
}
