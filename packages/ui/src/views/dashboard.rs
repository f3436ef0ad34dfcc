//! Role dashboards: load the display name, then show the tab shell.

use api::{DashboardIdentity, LecturerTab, StudentTab};
use dioxus::prelude::*;
use store::Role;

use super::profile_tab::ProfileTab;
use super::tabs::{Greeting, SignOutButton, TabBar, TabSlot};
use crate::alert::{use_alert, Alert};
use crate::components::LoadingPlaceholder;
use crate::context::use_services;

/// Who the dashboard is for. `user_id` is `None` when the fetch failed, in
/// which case `full_name` is the role's default display name.
#[derive(Clone, Debug, PartialEq)]
struct Shown {
    user_id: Option<String>,
    full_name: String,
}

impl Shown {
    fn fallback(role: Role) -> Self {
        Self {
            user_id: None,
            full_name: role.default_display_name().to_string(),
        }
    }
}

impl From<DashboardIdentity> for Shown {
    fn from(identity: DashboardIdentity) -> Self {
        Self {
            user_id: Some(identity.user_id),
            full_name: identity.full_name,
        }
    }
}

/// Fetches the dashboard identity for `role` once on mount. Failures raise an
/// alert and fall back to the role's default display name.
fn use_shown(role: Role) -> Resource<Shown> {
    let services = use_services();
    let mut alerts = use_alert();

    use_resource(move || {
        let backend = services.backend.clone();
        async move {
            match api::load_dashboard(backend.as_ref(), role).await {
                Ok(identity) => Shown::from(identity),
                Err(e) => {
                    tracing::warn!(role = role.as_str(), error = %e, "dashboard load failed");
                    alerts.set(Some(Alert::error(&e)));
                    Shown::fallback(role)
                }
            }
        }
    })
}

/// Every tab stays mounted; only the active one is visible.
#[component]
fn TabPane(visible: bool, children: Element) -> Element {
    rsx! {
        div {
            class: "edu-dashboard__body",
            hidden: !visible,
            {children}
        }
    }
}

#[component]
pub fn StudentDashboard() -> Element {
    let shown = use_shown(Role::Student);
    let mut active = use_signal(|| TabSlot::Home);

    let Some(Shown { user_id, full_name }) = shown.read().clone() else {
        return rsx! { LoadingPlaceholder {} };
    };
    let labels = StudentTab::ALL.map(StudentTab::label);

    rsx! {
        div {
            class: "edu-dashboard",
            TabPane {
                visible: active() == TabSlot::Home,
                Greeting { title: StudentTab::Home.title(), full_name: full_name.clone() }
            }
            TabPane {
                visible: active() == TabSlot::Courseworks,
                Greeting { title: StudentTab::Courseworks.title(), full_name: full_name.clone() }
            }
            TabPane {
                visible: active() == TabSlot::Profile,
                ProfileTab { student_id: user_id.clone(), full_name: full_name.clone() }
            }
            TabBar {
                labels,
                active: active(),
                onselect: move |slot| active.set(slot),
            }
        }
    }
}

#[component]
pub fn LecturerDashboard() -> Element {
    let shown = use_shown(Role::Lecturer);
    let mut active = use_signal(|| TabSlot::Home);

    let Some(Shown { full_name, .. }) = shown.read().clone() else {
        return rsx! { LoadingPlaceholder {} };
    };
    let labels = LecturerTab::ALL.map(LecturerTab::label);

    rsx! {
        div {
            class: "edu-dashboard",
            TabPane {
                visible: active() == TabSlot::Home,
                Greeting { title: LecturerTab::Home.title(), full_name: full_name.clone() }
            }
            TabPane {
                visible: active() == TabSlot::Courseworks,
                Greeting { title: LecturerTab::Courseworks.title(), full_name: full_name.clone() }
                SignOutButton {}
            }
            TabPane {
                visible: active() == TabSlot::Profile,
                Greeting { title: LecturerTab::Profile.title(), full_name: full_name.clone() }
                SignOutButton {}
            }
            TabBar {
                labels,
                active: active(),
                onselect: move |slot| active.set(slot),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_load_shows_role_name() {
        let shown = Shown::fallback(Role::Lecturer);
        assert_eq!(shown.full_name, "Lecturer");
        assert_eq!(shown.user_id, None);
        assert_eq!(Shown::fallback(Role::Student).full_name, "Student");
    }

    #[test]
    fn test_loaded_identity_carries_id() {
        let shown = Shown::from(DashboardIdentity {
            user_id: "s1".into(),
            full_name: "Ada".into(),
        });
        assert_eq!(shown.user_id.as_deref(), Some("s1"));
        assert_eq!(shown.full_name, "Ada");
    }
}
