use api::{NavAction, RegistrationForm, Screen};
use dioxus::prelude::*;
use store::Role;

use crate::alert::{show_alert, use_alert, Alert};
use crate::components::{Button, ButtonVariant, Input, Label, Picker};
use crate::context::{use_nav, use_services};

fn role_options() -> Vec<(String, String)> {
    Role::ALL
        .iter()
        .map(|r| (r.as_str().to_string(), r.label().to_string()))
        .collect()
}

#[component]
pub fn RegisterScreen() -> Element {
    let services = use_services();
    let mut nav = use_nav();
    let mut alerts = use_alert();

    let mut form = use_signal(RegistrationForm::default);
    let mut loading = use_signal(|| false);
    let clear_form = use_callback(move |_: ()| form.write().clear());

    let on_register = move |_: MouseEvent| {
        let backend = services.backend.clone();
        spawn(async move {
            let snapshot = form();
            loading.set(true);
            let result = api::register(backend.as_ref(), &snapshot).await;
            loading.set(false);
            match result {
                Ok(user) => {
                    tracing::info!(user_id = %user.user_id, "registration complete");
                    show_alert(
                        &mut alerts,
                        Alert::new(
                            "Registration Successful!",
                            "Your account has been created successfully. You can now log in.",
                        )
                        .with_action("Go to Login", user.navigation())
                        .on_dismiss(clear_form),
                    );
                }
                Err(e) => show_alert(&mut alerts, Alert::new(e.alert_title(), e.to_string())),
            }
        });
    };

    let current = form();
    let submit_disabled = loading() || !current.can_submit();

    rsx! {
        div {
            class: "edu-screen",
            h1 { class: "edu-title", "Create Account" }

            Input {
                value: current.full_name.clone(),
                placeholder: "Full Name",
                disabled: loading(),
                oninput: move |v| form.write().full_name = v,
            }
            Input {
                value: current.email.clone(),
                placeholder: "Email",
                kind: "email",
                disabled: loading(),
                oninput: move |v| form.write().email = v,
            }
            Input {
                value: current.password.clone(),
                placeholder: "Password",
                kind: "password",
                disabled: loading(),
                oninput: move |v| form.write().password = v,
            }

            Label { "I am a:" }
            Picker {
                value: current.role.as_str().to_string(),
                options: role_options(),
                disabled: loading(),
                onchange: move |v: String| {
                    if let Some(role) = Role::parse(&v) {
                        form.write().role = role;
                    }
                },
            }

            Button {
                disabled: submit_disabled,
                onclick: on_register,
                if loading() { "Creating Account..." } else { "Register" }
            }
            Button {
                variant: ButtonVariant::Secondary,
                disabled: loading(),
                onclick: move |_| nav.write().apply(NavAction::Navigate(Screen::Login)),
                "Already have an account? Login"
            }
        }
    }
}
