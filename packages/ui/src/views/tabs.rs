//! Tab bar and the tab bodies shared by both dashboards.

use dioxus::prelude::*;

use crate::alert::{show_alert, use_alert, Alert};
use crate::components::{Button, ButtonVariant};
use crate::context::{use_nav, use_services};
use crate::icons::{FaBook, FaHouse, FaUser};
use crate::Icon;

/// The three tab slots, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabSlot {
    Home,
    Courseworks,
    Profile,
}

impl TabSlot {
    pub const ALL: [TabSlot; 3] = [TabSlot::Home, TabSlot::Courseworks, TabSlot::Profile];
}

#[component]
fn TabIcon(slot: TabSlot) -> Element {
    match slot {
        TabSlot::Home => rsx! { Icon { icon: FaHouse, width: 18, height: 18 } },
        TabSlot::Courseworks => rsx! { Icon { icon: FaBook, width: 18, height: 18 } },
        TabSlot::Profile => rsx! { Icon { icon: FaUser, width: 18, height: 18 } },
    }
}

/// Bottom tab bar. `labels` are in [`TabSlot::ALL`] order.
#[component]
pub fn TabBar(labels: [&'static str; 3], active: TabSlot, onselect: EventHandler<TabSlot>) -> Element {
    rsx! {
        nav {
            class: "edu-tabbar",
            for (slot, label) in TabSlot::ALL.into_iter().zip(labels) {
                button {
                    key: "{label}",
                    class: if slot == active { "edu-tab edu-tab--active" } else { "edu-tab" },
                    onclick: move |_| onselect.call(slot),
                    TabIcon { slot }
                    span { "{label}" }
                }
            }
        }
    }
}

/// Header plus a greeting by name.
#[component]
pub fn Greeting(title: &'static str, full_name: String) -> Element {
    rsx! {
        div {
            class: "edu-tab-body",
            h2 { class: "edu-header", "{title}" }
            p { class: "edu-text", "Hello {full_name}" }
        }
    }
}

#[component]
pub fn SignOutButton() -> Element {
    let services = use_services();
    let mut nav = use_nav();
    let mut alerts = use_alert();
    let mut pending = use_signal(|| false);

    let on_sign_out = move |_: MouseEvent| {
        let backend = services.backend.clone();
        spawn(async move {
            pending.set(true);
            let result = api::sign_out(backend.as_ref()).await;
            pending.set(false);
            match result {
                Ok(then) => nav.write().apply(then),
                Err(e) => show_alert(&mut alerts, Alert::error(&e)),
            }
        });
    };

    rsx! {
        Button {
            variant: ButtonVariant::Danger,
            disabled: pending(),
            onclick: on_sign_out,
            "Sign Out"
        }
    }
}
