//! Screen routing state machine
//!
//! A single owner for the "which account screen is showing" state, with an
//! explicit transition table instead of ad hoc booleans. The flow invokes
//! observer callbacks at each transition; it never performs navigation
//! itself.

use std::sync::Arc;

/// The account screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Login screen (initial)
    #[default]
    Login,
    /// Registration screen
    Register,
    /// Authenticated area
    Home,
    /// Forgot-password screen
    ForgotPassword,
}

/// Notifications fired when the flow transitions.
///
/// All methods are no-arg and default to no-ops; the navigation layer
/// overrides the ones it cares about.
pub trait FlowObserver: Send + Sync {
    /// Login → Register
    fn on_navigate_to_sign_up(&self) {}
    /// Login → ForgotPassword
    fn on_navigate_to_forgot_password(&self) {}
    /// Login or Register → Home
    fn on_login_success(&self) {}
    /// Back from Register or ForgotPassword
    fn on_navigate_back(&self) {}
    /// Cancel out of Register or ForgotPassword
    fn on_cancel(&self) {}
}

/// Owner of the current [`Screen`].
///
/// Transition methods return whether the transition happened; a request
/// that is invalid from the current screen is ignored and the state is
/// left unchanged.
#[derive(Default)]
pub struct ScreenFlow {
    current: Screen,
    observer: Option<Arc<dyn FlowObserver>>,
}

impl ScreenFlow {
    /// Create a flow showing the login screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a transition observer.
    pub fn with_observer(mut self, observer: Arc<dyn FlowObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The screen currently showing.
    pub fn current(&self) -> Screen {
        self.current
    }

    fn notify(&self, f: impl Fn(&dyn FlowObserver)) {
        if let Some(observer) = &self.observer {
            f(observer.as_ref());
        }
    }

    /// Login → Register.
    pub fn go_to_sign_up(&mut self) -> bool {
        if self.current != Screen::Login {
            return false;
        }
        self.current = Screen::Register;
        self.notify(|o| o.on_navigate_to_sign_up());
        true
    }

    /// Login → ForgotPassword.
    pub fn go_to_forgot_password(&mut self) -> bool {
        if self.current != Screen::Login {
            return false;
        }
        self.current = Screen::ForgotPassword;
        self.notify(|o| o.on_navigate_to_forgot_password());
        true
    }

    /// Login or Register → Home, after a confirmed login.
    pub fn login_succeeded(&mut self) -> bool {
        if !matches!(self.current, Screen::Login | Screen::Register) {
            return false;
        }
        self.current = Screen::Home;
        self.notify(|o| o.on_login_success());
        true
    }

    /// Back out of Register or ForgotPassword to Login.
    pub fn go_back(&mut self) -> bool {
        if !matches!(self.current, Screen::Register | Screen::ForgotPassword) {
            return false;
        }
        self.current = Screen::Login;
        self.notify(|o| o.on_navigate_back());
        true
    }

    /// Cancel out of Register or ForgotPassword to Login.
    pub fn cancel(&mut self) -> bool {
        if !matches!(self.current, Screen::Register | Screen::ForgotPassword) {
            return false;
        }
        self.current = Screen::Login;
        self.notify(|o| o.on_cancel());
        true
    }

    /// Home → Login, after logout.
    pub fn logged_out(&mut self) -> bool {
        if self.current != Screen::Home {
            return false;
        }
        self.current = Screen::Login;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingObserver {
        sign_up: AtomicUsize,
        forgot: AtomicUsize,
        success: AtomicUsize,
        back: AtomicUsize,
        cancel: AtomicUsize,
    }

    impl FlowObserver for RecordingObserver {
        fn on_navigate_to_sign_up(&self) {
            self.sign_up.fetch_add(1, Ordering::SeqCst);
        }
        fn on_navigate_to_forgot_password(&self) {
            self.forgot.fetch_add(1, Ordering::SeqCst);
        }
        fn on_login_success(&self) {
            self.success.fetch_add(1, Ordering::SeqCst);
        }
        fn on_navigate_back(&self) {
            self.back.fetch_add(1, Ordering::SeqCst);
        }
        fn on_cancel(&self) {
            self.cancel.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_initial_screen_is_login() {
        let flow = ScreenFlow::new();
        assert_eq!(flow.current(), Screen::Login);
    }

    #[test]
    fn test_login_to_register_and_back() {
        let observer = Arc::new(RecordingObserver::default());
        let mut flow = ScreenFlow::new().with_observer(Arc::clone(&observer) as _);

        assert!(flow.go_to_sign_up());
        assert_eq!(flow.current(), Screen::Register);
        assert_eq!(observer.sign_up.load(Ordering::SeqCst), 1);

        assert!(flow.go_back());
        assert_eq!(flow.current(), Screen::Login);
        assert_eq!(observer.back.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_forgot_password_cancel() {
        let observer = Arc::new(RecordingObserver::default());
        let mut flow = ScreenFlow::new().with_observer(Arc::clone(&observer) as _);

        assert!(flow.go_to_forgot_password());
        assert_eq!(flow.current(), Screen::ForgotPassword);

        assert!(flow.cancel());
        assert_eq!(flow.current(), Screen::Login);
        assert_eq!(observer.cancel.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_login_success_from_login_and_register() {
        let observer = Arc::new(RecordingObserver::default());
        let mut flow = ScreenFlow::new().with_observer(Arc::clone(&observer) as _);

        assert!(flow.login_succeeded());
        assert_eq!(flow.current(), Screen::Home);
        assert_eq!(observer.success.load(Ordering::SeqCst), 1);

        assert!(flow.logged_out());
        assert!(flow.go_to_sign_up());
        assert!(flow.login_succeeded());
        assert_eq!(flow.current(), Screen::Home);
        assert_eq!(observer.success.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalid_transitions_are_ignored() {
        let mut flow = ScreenFlow::new();

        // Nothing to go back from on the login screen
        assert!(!flow.go_back());
        assert!(!flow.cancel());
        assert!(!flow.logged_out());
        assert_eq!(flow.current(), Screen::Login);

        flow.login_succeeded();
        assert!(!flow.go_to_sign_up());
        assert!(!flow.go_to_forgot_password());
        assert!(!flow.login_succeeded());
        assert_eq!(flow.current(), Screen::Home);
    }

    #[test]
    fn test_logout_returns_to_login() {
        let mut flow = ScreenFlow::new();
        flow.login_succeeded();
        assert!(flow.logged_out());
        assert_eq!(flow.current(), Screen::Login);
    }
}
