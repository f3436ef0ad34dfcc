mod dashboard;
pub use dashboard::{LecturerDashboard, StudentDashboard};

mod forgot_password;
pub use forgot_password::ForgotPasswordScreen;

mod login;
pub use login::LoginScreen;

mod profile_tab;
pub use profile_tab::ProfileTab;

mod register;
pub use register::RegisterScreen;

mod tabs;
pub use tabs::{Greeting, SignOutButton, TabBar, TabSlot};

use api::Screen;
use dioxus::prelude::*;

pub const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Renders whichever screen is on top of the navigation stack.
#[component]
pub fn ScreenHost() -> Element {
    let nav = crate::context::use_nav();

    let element = match nav.read().current() {
        Screen::Login => rsx! { LoginScreen {} },
        Screen::Register => rsx! { RegisterScreen {} },
        Screen::ForgotPassword => rsx! { ForgotPasswordScreen {} },
        Screen::StudentDashboard => rsx! { StudentDashboard {} },
        Screen::LecturerDashboard => rsx! { LecturerDashboard {} },
    };
    element
}
