use api::{NavAction, Screen};
use dioxus::prelude::*;

use crate::alert::{show_alert, use_alert, Alert};
use crate::components::{Button, ButtonVariant, Input};
use crate::context::{use_nav, use_services};

#[component]
pub fn ForgotPasswordScreen() -> Element {
    let services = use_services();
    let mut nav = use_nav();
    let mut alerts = use_alert();

    let mut email = use_signal(String::new);
    let mut loading = use_signal(|| false);

    let on_send = move |_: MouseEvent| {
        let backend = services.backend.clone();
        let redirect = services.config.auth.reset_redirect_url.clone();
        spawn(async move {
            loading.set(true);
            let result = api::request_password_reset(backend.as_ref(), &email(), &redirect).await;
            loading.set(false);
            let alert = match result {
                Ok(then) => Alert::new("Success", "Password reset email sent! Check your inbox.")
                    .with_action("OK", then),
                Err(e) => Alert::new(e.alert_title(), e.to_string()),
            };
            show_alert(&mut alerts, alert);
        });
    };

    rsx! {
        div {
            class: "edu-screen",
            h1 { class: "edu-title", "Reset Password" }
            p { class: "edu-subtitle", "Enter your email and we'll send you a reset link." }

            Input {
                value: email(),
                placeholder: "Email",
                kind: "email",
                disabled: loading(),
                oninput: move |v| email.set(v),
            }
            Button {
                disabled: loading(),
                onclick: on_send,
                if loading() { "Sending..." } else { "Send Reset Link" }
            }
            Button {
                variant: ButtonVariant::Secondary,
                disabled: loading(),
                onclick: move |_| nav.write().apply(NavAction::Navigate(Screen::Login)),
                "Back to Login"
            }
        }
    }
}
