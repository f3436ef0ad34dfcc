//! Blocking alerts.
//!
//! Every error a screen catches ends up here. An alert covers the app until it
//! is dismissed, and may carry a navigation step to take on dismissal.

use std::fmt::{self, Display};

use api::{NavAction, NavStack};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};

#[derive(Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub button: String,
    /// Applied to the navigation stack when the alert is dismissed.
    pub then: Option<NavAction>,
    /// Runs on dismissal, before `then`, while the screen that raised the alert is still mounted.
    pub on_dismiss: Option<Callback<()>>,
}

impl fmt::Debug for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alert")
            .field("title", &self.title)
            .field("message", &self.message)
            .field("button", &self.button)
            .field("then", &self.then)
            .field("on_dismiss", &self.on_dismiss.is_some())
            .finish()
    }
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            button: "OK".to_string(),
            then: None,
            on_dismiss: None,
        }
    }

    pub fn error(message: &impl Display) -> Self {
        Self::new("Error", message.to_string())
    }

    pub fn with_action(mut self, button: impl Into<String>, then: NavAction) -> Self {
        self.button = button.into();
        self.then = Some(then);
        self
    }

    pub fn on_dismiss(mut self, callback: Callback<()>) -> Self {
        self.on_dismiss = Some(callback);
        self
    }
}

pub type AlertSignal = Signal<Option<Alert>>;

pub fn use_alert() -> AlertSignal {
    use_context::<AlertSignal>()
}

pub fn show_alert(alerts: &mut AlertSignal, alert: Alert) {
    alerts.set(Some(alert));
}

/// Renders the pending alert, if any, above everything else.
#[component]
pub fn AlertHost() -> Element {
    let mut alerts = use_alert();
    let mut nav = use_context::<Signal<NavStack>>();

    let Some(alert) = alerts() else {
        return rsx! {};
    };

    let then = alert.then;
    let on_dismiss = alert.on_dismiss;
    let dismiss = move |_: MouseEvent| {
        alerts.set(None);
        if let Some(callback) = on_dismiss {
            callback.call(());
        }
        if let Some(action) = then {
            nav.write().apply(action);
        }
    };

    rsx! {
        div {
            class: "edu-alert-backdrop",
            div {
                class: "edu-alert",
                role: "alertdialog",
                h2 { class: "edu-alert__title", "{alert.title}" }
                p { class: "edu-alert__message", "{alert.message}" }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: dismiss,
                    "{alert.button}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{AppError, Screen};

    #[test]
    fn test_error_alert_uses_display_text() {
        let alert = Alert::error(&AppError::RoleNotFound);
        assert_eq!(alert.title, "Error");
        assert_eq!(
            alert.message,
            "User account exists but role not found. Please contact support."
        );
        assert_eq!(alert.then, None);
        assert!(alert.on_dismiss.is_none());
    }

    #[test]
    fn test_follow_up_navigation() {
        let alert = Alert::new("Registration Successful!", "done")
            .with_action("Go to Login", NavAction::Navigate(Screen::Login));
        assert_eq!(alert.button, "Go to Login");

        let mut nav = NavStack::default();
        nav.apply(NavAction::Navigate(Screen::Register));
        if let Some(action) = alert.then {
            nav.apply(action);
        }
        assert_eq!(nav.routes(), &[Screen::Login]);
    }
}
