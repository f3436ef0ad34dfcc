//! # Navigation model
//!
//! The app is a single stack of [`Screen`]s. Flows never touch the UI; they
//! return a [`NavAction`] and the shell applies it to its [`NavStack`].
//!
//! - [`NavAction::Navigate`] is an ordinary transition: push the screen, or, if
//!   it is already on the stack, return to it (so Register → Login does not pile
//!   up copies of Login).
//! - [`NavAction::Reset`] replaces the whole history with one route. Entering a
//!   dashboard and signing out both reset, so back navigation can never reach a
//!   login form from a dashboard or a dashboard after sign-out.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    Register,
    ForgotPassword,
    StudentDashboard,
    LecturerDashboard,
}

impl Screen {
    pub const INITIAL: Screen = Screen::Login;

    pub fn name(self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Register => "Register",
            Screen::ForgotPassword => "ForgotPassword",
            Screen::StudentDashboard => "StudentDashboard",
            Screen::LecturerDashboard => "LecturerDashboard",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    Navigate(Screen),
    Reset(Screen),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavStack {
    routes: Vec<Screen>,
}

impl Default for NavStack {
    fn default() -> Self {
        Self::new(Screen::INITIAL)
    }
}

impl NavStack {
    pub fn new(initial: Screen) -> Self {
        Self {
            routes: vec![initial],
        }
    }

    /// The visible screen. The stack is never empty.
    pub fn current(&self) -> Screen {
        self.routes.last().copied().unwrap_or(Screen::INITIAL)
    }

    pub fn routes(&self) -> &[Screen] {
        &self.routes
    }

    pub fn apply(&mut self, action: NavAction) {
        match action {
            NavAction::Navigate(screen) => {
                if let Some(pos) = self.routes.iter().position(|s| *s == screen) {
                    self.routes.truncate(pos + 1);
                } else {
                    self.routes.push(screen);
                }
            }
            NavAction::Reset(screen) => {
                self.routes.clear();
                self.routes.push(screen);
            }
        }
        tracing::debug!(screen = self.current().name(), depth = self.routes.len(), "navigated");
    }

    pub fn can_go_back(&self) -> bool {
        self.routes.len() > 1
    }

    /// Pop the top screen. Returns false when already at the root.
    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.routes.pop();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_login() {
        let nav = NavStack::default();
        assert_eq!(nav.current(), Screen::Login);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_navigate_pushes_and_returns() {
        let mut nav = NavStack::default();
        nav.apply(NavAction::Navigate(Screen::Register));
        assert_eq!(nav.routes(), &[Screen::Login, Screen::Register]);

        nav.apply(NavAction::Navigate(Screen::Login));
        assert_eq!(nav.routes(), &[Screen::Login]);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut nav = NavStack::default();
        nav.apply(NavAction::Navigate(Screen::ForgotPassword));
        nav.apply(NavAction::Reset(Screen::StudentDashboard));

        assert_eq!(nav.routes(), &[Screen::StudentDashboard]);
        assert!(!nav.back());
        assert_eq!(nav.current(), Screen::StudentDashboard);
    }

    #[test]
    fn test_back_pops_one_screen() {
        let mut nav = NavStack::default();
        nav.apply(NavAction::Navigate(Screen::ForgotPassword));
        assert!(nav.back());
        assert_eq!(nav.current(), Screen::Login);
    }
}
