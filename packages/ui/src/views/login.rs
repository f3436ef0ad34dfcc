use api::{NavAction, Screen};
use dioxus::prelude::*;

use crate::alert::{show_alert, use_alert, Alert};
use crate::components::{Button, ButtonVariant, Input};
use crate::context::{use_nav, use_services};

#[component]
pub fn LoginScreen() -> Element {
    let services = use_services();
    let mut nav = use_nav();
    let mut alerts = use_alert();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut loading = use_signal(|| false);

    let on_login = move |_: MouseEvent| {
        let backend = services.backend.clone();
        spawn(async move {
            loading.set(true);
            let result = api::login(backend.as_ref(), &email(), &password()).await;
            loading.set(false);
            match result {
                Ok(outcome) => nav.write().apply(outcome.navigation()),
                Err(e) => show_alert(&mut alerts, Alert::new(e.alert_title(), e.to_string())),
            }
        });
    };

    rsx! {
        div {
            class: "edu-screen",
            h1 { class: "edu-title", "EduSync" }
            p { class: "edu-subtitle", "Sign in to continue" }

            Input {
                value: email(),
                placeholder: "Email",
                kind: "email",
                disabled: loading(),
                oninput: move |v| email.set(v),
            }
            Input {
                value: password(),
                placeholder: "Password",
                kind: "password",
                disabled: loading(),
                oninput: move |v| password.set(v),
            }

            Button {
                disabled: loading(),
                onclick: on_login,
                if loading() { "Logging in..." } else { "Login" }
            }

            Button {
                variant: ButtonVariant::Secondary,
                disabled: loading(),
                onclick: move |_| nav.write().apply(NavAction::Navigate(Screen::ForgotPassword)),
                "Forgot Password?"
            }
            Button {
                variant: ButtonVariant::Secondary,
                disabled: loading(),
                onclick: move |_| nav.write().apply(NavAction::Navigate(Screen::Register)),
                "Don't have an account? Register"
            }
        }
    }
}
