//! Student profile editor tab.

use api::{AppError, ProfileEditor};
use dioxus::prelude::*;

use super::tabs::SignOutButton;
use crate::alert::{show_alert, use_alert, Alert};
use crate::components::{same_options, Button, ButtonVariant, Label, LoadingPlaceholder, Picker};
use crate::context::use_services;

/// `student_id` is `None` when the dashboard could not identify the user;
/// the editor then starts empty and saving reports the missing user.
#[component]
pub fn ProfileTab(#[props(!optional)] student_id: Option<String>, full_name: String) -> Element {
    let services = use_services();
    let mut alerts = use_alert();

    let mut editor = use_signal(ProfileEditor::default);
    let mut loaded = use_signal(|| false);
    let mut saving = use_signal(|| false);

    let load_services = services.clone();
    let load_id = student_id.clone();
    use_effect(move || {
        let backend = load_services.backend.clone();
        let Some(id) = load_id.clone() else {
            loaded.set(true);
            return;
        };
        spawn(async move {
            match api::load_profile(backend.as_ref(), &id).await {
                Ok(fetched) => editor.set(fetched),
                Err(e) => {
                    tracing::warn!(student_id = %id, error = %e, "profile fetch failed");
                    show_alert(&mut alerts, Alert::error(&e));
                }
            }
            loaded.set(true);
        });
    });

    let save_services = services.clone();
    let on_save = move |_: MouseEvent| {
        let backend = save_services.backend.clone();
        let Some(id) = student_id.clone() else {
            show_alert(&mut alerts, Alert::error(&AppError::NoUser));
            return;
        };
        spawn(async move {
            let snapshot = editor();
            saving.set(true);
            let result = api::save_profile(backend.as_ref(), &id, &snapshot).await;
            saving.set(false);
            let alert = match result {
                Ok(()) => Alert::new("Success", "Profile updated successfully"),
                Err(e) => Alert::error(&e),
            };
            show_alert(&mut alerts, alert);
        });
    };

    if !loaded() {
        return rsx! { LoadingPlaceholder {} };
    }

    let catalog = &services.config.catalog;
    let current = editor();
    let summary = current.selected_summary();
    let busy = saving();

    rsx! {
        div {
            class: "edu-tab-body",
            h2 { class: "edu-header", "Student Profile" }
            p { class: "edu-text", "Hello {full_name}" }

            Label { "Faculty" }
            Picker {
                value: current.faculty.clone(),
                options: same_options(&catalog.faculties),
                placeholder: "Select Faculty".to_string(),
                disabled: busy,
                onchange: move |v: String| editor.write().set_faculty(v),
            }

            Label { "Program" }
            Picker {
                value: current.program.clone(),
                options: same_options(&catalog.programs),
                placeholder: "Select Program".to_string(),
                disabled: busy,
                onchange: move |v: String| editor.write().set_program(v),
            }

            Label { "Courses" }
            Picker {
                value: String::new(),
                options: same_options(&catalog.courses),
                placeholder: "Add a Course".to_string(),
                disabled: busy,
                onchange: move |v: String| {
                    editor.write().add_course(&v);
                },
            }
            p { class: "edu-text", "Selected: {summary}" }

            Button {
                variant: ButtonVariant::Secondary,
                disabled: busy || !current.can_clear(),
                onclick: move |_| editor.write().clear_courses(),
                "Clear Courses"
            }

            Button {
                disabled: busy,
                onclick: on_save,
                if busy { "Saving..." } else { "Save Profile" }
            }
            SignOutButton {}
        }
    }
}
