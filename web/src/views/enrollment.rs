use crate::{
    backend::use_backend,
    toast::use_toast,
    views::components::{PageHeader, SearchInput, StatusBadge},
};
use api::CampusRepository;
use dioxus::prelude::*;
use types::{
    course::{EnrollmentBoard, OfferedCourse, SlotOffering},
    matches_query,
};

#[component]
pub fn StudentEnrollment() -> Element {
    let backend = use_backend();
    let mut toast = use_toast();
    let mut board = use_signal(EnrollmentBoard::default);
    let mut loading = use_signal(|| true);
    let mut query = use_signal(String::new);
    let mut submitting = use_signal(|| None::<String>);

    use_effect({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            spawn(async move {
                loading.set(true);
                let offerings = backend.slot_offerings().await;
                let enrollments = backend.enrollments().await;
                match (offerings, enrollments) {
                    (Ok(o), Ok(e)) => board.set(EnrollmentBoard::new(o, e)),
                    (Err(e), _) | (_, Err(e)) => toast.error(e),
                }
                loading.set(false);
            });
        }
    });

    let request = move |slot: String| {
        let Some(course_id) = board.read().pick(&slot).map(str::to_string) else {
            toast.error(format!("Pick a course for slot {slot} first."));
            return;
        };
        let backend = backend.clone();
        spawn(async move {
            submitting.set(Some(slot.clone()));
            match backend.request_enrollment(&slot, &course_id).await {
                Ok(enrollment) => {
                    tracing::info!(%slot, %course_id, "enrollment requested");
                    board.write().record(enrollment);
                    toast.success(format!("Enrollment requested for slot {slot}."));
                }
                Err(e) => {
                    tracing::error!(%slot, %course_id, error = %e, "enrollment request failed");
                    toast.error(e);
                }
            }
            submitting.set(None);
        });
    };

    rsx! {
        div {
            PageHeader {
                title: "Course Enrollment",
                subtitle: "Choose one course in each slot and send it for approval.",
                SearchInput {
                    value: query(),
                    placeholder: "Search by code, title or faculty",
                    on_input: move |value| query.set(value),
                }
            }

            if loading() {
                div { class: "loading", "Loading slots..." }
            } else if board.read().offerings().is_empty() {
                div { class: "empty-message", "No slots are open for enrollment." }
            } else {
                div { class: "slot-grid",
                    for offering in board.read().offerings().iter().cloned() {
                        SlotCard {
                            key: "{offering.slot}",
                            offering,
                            board: board(),
                            query: query(),
                            busy: submitting().is_some(),
                            on_pick: move |(slot, course_id): (String, String)| {
                                if let Err(e) = board.write().select(&slot, &course_id) {
                                    toast.error(e);
                                }
                            },
                            on_request: {
                                let mut request = request.clone();
                                move |slot: String| request(slot)
                            },
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SlotCard(
    offering: SlotOffering,
    board: EnrollmentBoard,
    query: String,
    busy: bool,
    on_pick: EventHandler<(String, String)>,
    on_request: EventHandler<String>,
) -> Element {
    let slot = offering.slot.clone();
    let locked = board.is_locked(&slot);
    let decision = board.decision(&slot).cloned();
    let picked = board.pick(&slot).map(str::to_string);
    let courses: Vec<OfferedCourse> = offering
        .courses
        .iter()
        .filter(|c| matches_query(&query, &[&c.code, &c.title, &c.faculty]))
        .cloned()
        .collect();

    rsx! {
        div { class: "card slot-card",
            div { class: "card-header",
                h2 { class: "card-title", "Slot {slot}" }
                if let Some(decision) = decision {
                    StatusBadge { status: decision.status }
                }
            }
            if courses.is_empty() {
                p { class: "text-muted", "No courses match your search." }
            }
            ul { class: "course-options",
                for course in courses {
                    {
                        let full = course.is_full();
                        let checked = picked.as_deref() == Some(course.id.as_str())
                            || board.status_of(&slot, &course.id).is_some();
                        let seats = course.available_seats();
                        let pick = (slot.clone(), course.id.clone());
                        rsx! {
                            li {
                                key: "{course.id}",
                                class: "course-option",
                                class: if full { "full" },
                                label { class: "radio-label",
                                    input {
                                        r#type: "radio",
                                        name: "slot-{slot}",
                                        checked,
                                        disabled: locked || full,
                                        onchange: move |_| on_pick.call(pick.clone()),
                                    }
                                    span { class: "course-code", "{course.code}" }
                                    span { class: "course-title", "{course.title}" }
                                    span { class: "course-faculty", "{course.faculty}" }
                                    if full {
                                        span { class: "seats seats-full", "Full" }
                                    } else {
                                        span { class: "seats", "{seats} seats left" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            if !locked {
                div { class: "card-footer",
                    button {
                        class: "btn btn-primary",
                        disabled: busy || picked.is_none(),
                        onclick: {
                            let slot = slot.clone();
                            move |_| on_request.call(slot.clone())
                        },
                        if busy { "Sending..." } else { "Request Enrollment" }
                    }
                }
            }
        }
    }
}
