//! Form primitives shared by every screen.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "edu-btn edu-btn--primary",
            ButtonVariant::Secondary => "edu-btn edu-btn--secondary",
            ButtonVariant::Danger => "edu-btn edu-btn--danger",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] disabled: bool,
    onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: variant.class(),
            disabled: disabled,
            onclick: move |evt| onclick.call(evt),
            {children}
        }
    }
}

/// Single-line text field. `kind` is the HTML input type (`text`, `email`, `password`).
#[component]
pub fn Input(
    value: String,
    placeholder: String,
    #[props(default = "text".to_string())] kind: String,
    #[props(default)] disabled: bool,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        input {
            class: "edu-input",
            r#type: "{kind}",
            placeholder: "{placeholder}",
            value: "{value}",
            disabled: disabled,
            oninput: move |evt: FormEvent| oninput.call(evt.value()),
        }
    }
}

#[component]
pub fn Label(children: Element) -> Element {
    rsx! {
        label { class: "edu-label", {children} }
    }
}

/// Drop-down picker over `(value, label)` pairs, with an optional empty first entry.
#[component]
pub fn Picker(
    value: String,
    options: Vec<(String, String)>,
    #[props(default)] placeholder: Option<String>,
    #[props(default)] disabled: bool,
    onchange: EventHandler<String>,
) -> Element {
    rsx! {
        select {
            class: "edu-picker",
            value: "{value}",
            disabled: disabled,
            onchange: move |evt: FormEvent| onchange.call(evt.value()),
            if let Some(placeholder) = placeholder {
                option { value: "", "{placeholder}" }
            }
            for (v, label) in options {
                option {
                    key: "{v}",
                    value: "{v}",
                    selected: v == value,
                    "{label}"
                }
            }
        }
    }
}

/// Picker options where value and label are the same string.
pub fn same_options(items: &[String]) -> Vec<(String, String)> {
    items.iter().map(|s| (s.clone(), s.clone())).collect()
}

/// Minimal screen shown while a screen's initial fetch is pending.
#[component]
pub fn LoadingPlaceholder() -> Element {
    rsx! {
        div {
            class: "edu-screen edu-screen--center",
            p { class: "edu-text", "Loading..." }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_options_pairs_value_and_label() {
        let opts = same_options(&["Math 101".to_string(), "CS 301".to_string()]);
        assert_eq!(opts[1], ("CS 301".to_string(), "CS 301".to_string()));
    }
}
