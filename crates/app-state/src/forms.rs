//! Form controllers for the account screens
//!
//! Each form owns its credentials, its error map, and its in-flight flag
//! exclusively; nothing is shared between form instances. Submission is
//! gated by the validation aggregator, and remote failures surface as a
//! single form-level message, never as a propagated error.

use auth_client::{AuthApi, AuthUser};
use validation::{
    validate_login_form, validate_reset_email, validate_sign_in_form, Credentials, FormErrors,
    SignInCredentials,
};

use crate::session::{SessionManager, UserProfile};

fn profile_from(user: AuthUser) -> UserProfile {
    UserProfile { email: user.email, username: user.username }
}

/// Persist a confirmed login, reporting any storage hiccup as a form-level
/// message rather than an error.
async fn establish_session(
    session: &SessionManager,
    user: AuthUser,
    errors: &mut FormErrors,
) -> bool {
    match session.complete_login(&profile_from(user)).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!("Failed to persist session: {err}");
            errors.form = Some("Something went wrong. Please try again.".to_string());
            false
        }
    }
}

/// Controller for the combined login form (username, email, password,
/// confirmation).
#[derive(Default)]
pub struct LoginForm {
    credentials: Credentials,
    errors: FormErrors,
    is_loading: bool,
}

impl LoginForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field values.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Current error map.
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// True while a submission is outstanding.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Update the username; clears its error so nothing stale lingers.
    pub fn set_username(&mut self, value: impl Into<String>) {
        self.credentials.username = value.into();
        self.errors.username = None;
        self.errors.form = None;
    }

    /// Update the email.
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.credentials.email = value.into();
        self.errors.email = None;
        self.errors.form = None;
    }

    /// Update the password.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.credentials.password = value.into();
        self.errors.password = None;
        self.errors.form = None;
    }

    /// Update the confirmation.
    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        self.credentials.confirm_password = value.into();
        self.errors.confirm_password = None;
        self.errors.form = None;
    }

    /// Submit the form.
    ///
    /// Ignored while a previous submission is outstanding. Validation runs
    /// first and stops the submission on any field error; otherwise the
    /// request runs to completion with the loading flag held for the whole
    /// window. Returns true when the session was established.
    pub async fn submit(&mut self, api: &dyn AuthApi, session: &SessionManager) -> bool {
        if self.is_loading {
            return false;
        }

        self.errors = validate_login_form(&self.credentials);
        if !self.errors.is_empty() {
            return false;
        }

        self.is_loading = true;
        let result = api
            .login(&self.credentials.email, &self.credentials.password)
            .await;
        let established = match result {
            Ok(user) => establish_session(session, user, &mut self.errors).await,
            Err(err) => {
                self.errors.form = Some(err.user_message());
                false
            }
        };
        self.is_loading = false;
        established
    }
}

/// Controller for the registration form.
///
/// Same field shape as [`LoginForm`]; a successful registration is
/// immediately treated as a confirmed login.
#[derive(Default)]
pub struct RegistrationForm {
    credentials: Credentials,
    errors: FormErrors,
    is_loading: bool,
}

impl RegistrationForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field values.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Current error map.
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// True while a submission is outstanding.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Update the username.
    pub fn set_username(&mut self, value: impl Into<String>) {
        self.credentials.username = value.into();
        self.errors.username = None;
        self.errors.form = None;
    }

    /// Update the email.
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.credentials.email = value.into();
        self.errors.email = None;
        self.errors.form = None;
    }

    /// Update the password.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.credentials.password = value.into();
        self.errors.password = None;
        self.errors.form = None;
    }

    /// Update the confirmation.
    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        self.credentials.confirm_password = value.into();
        self.errors.confirm_password = None;
        self.errors.form = None;
    }

    /// Submit the form; see [`LoginForm::submit`] for the gating rules.
    pub async fn submit(&mut self, api: &dyn AuthApi, session: &SessionManager) -> bool {
        if self.is_loading {
            return false;
        }

        self.errors = validate_login_form(&self.credentials);
        if !self.errors.is_empty() {
            return false;
        }

        self.is_loading = true;
        let result = api
            .register(
                self.credentials.username.trim(),
                &self.credentials.email,
                &self.credentials.password,
            )
            .await;
        let established = match result {
            Ok(user) => establish_session(session, user, &mut self.errors).await,
            Err(err) => {
                self.errors.form = Some(err.user_message());
                false
            }
        };
        self.is_loading = false;
        established
    }
}

/// Controller for the sign-in-only form (email and password).
#[derive(Default)]
pub struct SignInForm {
    credentials: SignInCredentials,
    errors: FormErrors,
    is_loading: bool,
}

impl SignInForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field values.
    pub fn credentials(&self) -> &SignInCredentials {
        &self.credentials
    }

    /// Current error map.
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// True while a submission is outstanding.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Update the email.
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.credentials.email = value.into();
        self.errors.email = None;
        self.errors.form = None;
    }

    /// Update the password.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.credentials.password = value.into();
        self.errors.password = None;
        self.errors.form = None;
    }

    /// Submit the form; see [`LoginForm::submit`] for the gating rules.
    pub async fn submit(&mut self, api: &dyn AuthApi, session: &SessionManager) -> bool {
        if self.is_loading {
            return false;
        }

        self.errors = validate_sign_in_form(&self.credentials);
        if !self.errors.is_empty() {
            return false;
        }

        self.is_loading = true;
        let result = api
            .login(&self.credentials.email, &self.credentials.password)
            .await;
        let established = match result {
            Ok(user) => establish_session(session, user, &mut self.errors).await,
            Err(err) => {
                self.errors.form = Some(err.user_message());
                false
            }
        };
        self.is_loading = false;
        established
    }
}

/// Controller for the forgot-password form.
#[derive(Default)]
pub struct ForgotPasswordForm {
    email: String,
    errors: FormErrors,
    is_loading: bool,
    submitted: bool,
}

impl ForgotPasswordForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current email value.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Current error map.
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// True while a submission is outstanding.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// True once a reset request has been accepted, so the UI can show
    /// the confirmation state.
    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// Update the email. Clears the confirmation state; the new address
    /// has not been submitted yet.
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.errors.email = None;
        self.errors.form = None;
        self.submitted = false;
    }

    /// Request a password reset email.
    pub async fn submit(&mut self, api: &dyn AuthApi) -> bool {
        if self.is_loading {
            return false;
        }

        self.errors = validate_reset_email(&self.email);
        if !self.errors.is_empty() {
            return false;
        }

        self.is_loading = true;
        let accepted = match api.request_password_reset(&self.email).await {
            Ok(()) => {
                self.submitted = true;
                true
            }
            Err(err) => {
                self.errors.form = Some(err.user_message());
                false
            }
        };
        self.is_loading = false;
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use auth_client::FakeAuthApi;
    use std::sync::Arc;
    use storage::MemorySessionStore;
    use validation::FieldError;

    fn session() -> SessionManager {
        SessionManager::new(Arc::new(MemorySessionStore::new()))
    }

    fn fill_valid(form: &mut LoginForm) {
        form.set_username("alice_99");
        form.set_email("alice@example.com");
        form.set_password("ValidPass123");
        form.set_confirm_password("ValidPass123");
    }

    #[tokio::test]
    async fn test_submit_blocks_on_field_errors() {
        let api = FakeAuthApi::new();
        let session = session();
        session.bootstrap().await;

        let mut form = LoginForm::new();
        assert!(!form.submit(&api, &session).await);

        assert_eq!(form.errors().len(), 4);
        assert_eq!(session.state().await, SessionState::Unauthenticated);
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn test_successful_login_establishes_session() {
        let api = FakeAuthApi::new().with_user("alice@example.com", "ValidPass123");
        let session = session();
        session.bootstrap().await;

        let mut form = LoginForm::new();
        fill_valid(&mut form);

        assert!(form.submit(&api, &session).await);
        assert!(form.errors().is_empty());
        assert!(!form.is_loading());
        assert_eq!(session.state().await, SessionState::Authenticated);
    }

    #[tokio::test]
    async fn test_rejected_login_sets_form_error_only() {
        let api = FakeAuthApi::new().with_user("alice@example.com", "ValidPass123");
        let session = session();
        session.bootstrap().await;

        let mut form = LoginForm::new();
        fill_valid(&mut form);
        form.set_password("WrongPass123");
        form.set_confirm_password("WrongPass123");

        assert!(!form.submit(&api, &session).await);
        assert_eq!(
            form.errors().form.as_deref(),
            Some("Invalid email or password")
        );
        assert_eq!(form.errors().len(), 1);
        // Login failures never touch the session state
        assert_eq!(session.state().await, SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_editing_a_field_clears_its_error() {
        let api = FakeAuthApi::new();
        let session = session();
        session.bootstrap().await;

        let mut form = LoginForm::new();
        form.submit(&api, &session).await;
        assert_eq!(form.errors().username, Some(FieldError::UsernameRequired));

        form.set_username("alice_99");
        assert_eq!(form.errors().username, None);
        // The other errors are untouched until their fields change
        assert_eq!(form.errors().email, Some(FieldError::EmailRequired));
    }

    #[tokio::test]
    async fn test_editing_clears_form_level_error() {
        let api = FakeAuthApi::new();
        let session = session();
        session.bootstrap().await;

        let mut form = LoginForm::new();
        fill_valid(&mut form);
        form.submit(&api, &session).await;
        assert!(form.errors().form.is_some());

        form.set_password("NewPass123");
        assert_eq!(form.errors().form, None);
    }

    #[tokio::test]
    async fn test_duplicate_submission_is_ignored() {
        let api = FakeAuthApi::new().with_user("alice@example.com", "ValidPass123");
        let session = session();
        session.bootstrap().await;

        let mut form = LoginForm::new();
        fill_valid(&mut form);

        // Simulate an outstanding request
        form.is_loading = true;
        assert!(!form.submit(&api, &session).await);
        assert_eq!(session.state().await, SessionState::Unauthenticated);

        form.is_loading = false;
        assert!(form.submit(&api, &session).await);
    }

    #[tokio::test]
    async fn test_registration_form_happy_path() {
        let api = FakeAuthApi::new();
        let session = session();
        session.bootstrap().await;

        let mut form = RegistrationForm::new();
        form.set_username("bob_7");
        form.set_email("bob@example.com");
        form.set_password("ValidPass123");
        form.set_confirm_password("ValidPass123");

        assert!(form.submit(&api, &session).await);
        assert_eq!(session.state().await, SessionState::Authenticated);
        assert_eq!(
            session.profile().await.and_then(|p| p.username),
            Some("bob_7".to_string())
        );
    }

    #[tokio::test]
    async fn test_registration_mismatched_confirmation() {
        let api = FakeAuthApi::new();
        let session = session();
        session.bootstrap().await;

        let mut form = RegistrationForm::new();
        form.set_username("bob_7");
        form.set_email("bob@example.com");
        form.set_password("ValidPass123");
        form.set_confirm_password("ValidPass124");

        assert!(!form.submit(&api, &session).await);
        assert_eq!(
            form.errors().confirm_password,
            Some(FieldError::PasswordMismatch)
        );
    }

    #[tokio::test]
    async fn test_registration_duplicate_email_surfaces_service_message() {
        let api = FakeAuthApi::new().with_user("bob@example.com", "OtherPass123");
        let session = session();
        session.bootstrap().await;

        let mut form = RegistrationForm::new();
        form.set_username("bob_7");
        form.set_email("bob@example.com");
        form.set_password("ValidPass123");
        form.set_confirm_password("ValidPass123");

        assert!(!form.submit(&api, &session).await);
        assert_eq!(
            form.errors().form.as_deref(),
            Some("An account with this email already exists")
        );
    }

    #[tokio::test]
    async fn test_sign_in_form() {
        let api = FakeAuthApi::new().with_user("alice@example.com", "ValidPass123");
        let session = session();
        session.bootstrap().await;

        let mut form = SignInForm::new();
        assert!(!form.submit(&api, &session).await);
        assert_eq!(form.errors().email, Some(FieldError::EmailRequired));

        form.set_email("alice@example.com");
        form.set_password("ValidPass123");
        assert!(form.submit(&api, &session).await);
        assert_eq!(session.state().await, SessionState::Authenticated);
    }

    #[tokio::test]
    async fn test_forgot_password_flow() {
        let api = FakeAuthApi::new();

        let mut form = ForgotPasswordForm::new();
        assert!(!form.submit(&api).await);
        assert_eq!(form.errors().email, Some(FieldError::EmailRequired));
        assert!(!form.submitted());

        form.set_email("alice@example.com");
        assert!(form.submit(&api).await);
        assert!(form.submitted());
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn test_editing_email_clears_reset_confirmation() {
        let api = FakeAuthApi::new();

        let mut form = ForgotPasswordForm::new();
        form.set_email("alice@example.com");
        assert!(form.submit(&api).await);
        assert!(form.submitted());

        // Typing a different address drops the confirmation until it is
        // submitted in turn
        form.set_email("bob@example.com");
        assert!(!form.submitted());

        assert!(form.submit(&api).await);
        assert!(form.submitted());
    }
}
