use dioxus::prelude::*;
use types::course::{ApprovalStatus, Course};
use ui::mutation::MutationState;

#[component]
pub fn PageHeader(title: String, subtitle: String, #[props(default)] children: Element) -> Element {
    rsx! {
        div { class: "page-header",
            div { class: "page-header-content",
                h1 { class: "page-title", "{title}" }
                p { class: "page-subtitle", "{subtitle}" }
            }
            div { class: "page-header-actions", {children} }
        }
    }
}

#[component]
pub fn SearchInput(value: String, placeholder: String, on_input: EventHandler<String>) -> Element {
    rsx! {
        input {
            class: "form-input search-input",
            r#type: "search",
            placeholder,
            value,
            oninput: move |e| on_input.call(e.value()),
        }
    }
}

/// A select listing courses by code and title. The empty option means no
/// course.
#[component]
pub fn CourseSelect(
    courses: Vec<Course>,
    selected: Option<String>,
    on_select: EventHandler<Option<String>>,
    #[props(default)] disabled: bool,
) -> Element {
    let current = selected.unwrap_or_default();

    rsx! {
        select {
            class: "form-input",
            disabled,
            value: "{current}",
            onchange: move |e| {
                let value = e.value();
                on_select.call((!value.is_empty()).then_some(value));
            },
            option { value: "", "Select course" }
            for course in courses {
                option {
                    key: "{course.id}",
                    value: "{course.id}",
                    selected: course.id == current,
                    {course.label()}
                }
            }
        }
    }
}

#[component]
pub fn StatusBadge(status: ApprovalStatus) -> Element {
    rsx! {
        span { class: status.css_class(), {status.label()} }
    }
}

/// Inline progress or failure of a record's mutation.
#[component]
pub fn MutationNote(state: MutationState) -> Element {
    match state {
        MutationState::Pending => rsx! {
            span { class: "mutation-note pending", "(saving...)" }
        },
        MutationState::Rejected(reason) => rsx! {
            span { class: "mutation-note rejected", title: "{reason}", "Failed: {reason}" }
        },
        MutationState::Idle | MutationState::Applied => rsx! {},
    }
}
