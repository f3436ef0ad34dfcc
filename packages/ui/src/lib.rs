//! Shared Dioxus UI for EduSync: screens, alerts, form primitives and the
//! application context they read from.

pub mod alert;
pub mod components;
pub mod config;
pub mod context;
pub mod views;

pub use alert::{use_alert, Alert, AlertHost};
pub use config::{load_config, make_services};
pub use context::{use_nav, use_services, AppProvider, Services};
pub use views::{ScreenHost, VIEWS_CSS};

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}
