use dioxus::prelude::*;

use crate::panel::PanelKey;

/// A titled card with a maximize/minimize control.
#[component]
pub fn Panel(panel: PanelKey, maximized: bool, on_toggle: EventHandler<()>, children: Element) -> Element {
    let label = if maximized { "Minimize" } else { "Maximize" };
    let title = panel.title();
    let tone = panel.tone();

    rsx! {
        section { class: "panel",
            div { class: "panel-header {tone}",
                div { class: "panel-title",
                    span { class: "panel-dot" }
                    "{title}"
                }
                button {
                    r#type: "button",
                    class: "panel-toggle",
                    title: label,
                    aria_label: label,
                    onclick: move |_| on_toggle.call(()),
                    if maximized { "–" } else { "⤢" }
                }
            }
            div { class: "panel-body", {children} }
        }
    }
}

/// Full-screen layer over the page. Clicking the backdrop dismisses it.
#[component]
pub fn Overlay(on_dismiss: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div { class: "overlay",
            div {
                class: "overlay-backdrop",
                aria_hidden: "true",
                onclick: move |_| on_dismiss.call(()),
            }
            div { class: "overlay-content", {children} }
        }
    }
}

#[component]
pub fn EmptyState(title: String, detail: String) -> Element {
    rsx! {
        div { class: "empty-state",
            div { class: "empty-state-icon", "×" }
            div { class: "empty-state-title", "{title}" }
            div { class: "empty-state-detail", "{detail}" }
        }
    }
}
