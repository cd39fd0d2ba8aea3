use crate::{
    backend::use_backend,
    toast::use_toast,
    views::components::{MutationNote, PageHeader, SearchInput, StatusBadge},
};
use api::CampusRepository;
use dioxus::prelude::*;
use jiff::Zoned;
use types::course::{ApprovalStatus, Course};
use ui::{
    EmptyState,
    mutation::{Change, MutationState, RecordSet},
};

#[component]
pub fn CourseApprovals() -> Element {
    let backend = use_backend();
    let mut toast = use_toast();
    let mut records = use_signal(RecordSet::<Course>::default);
    let mut query = use_signal(String::new);
    let mut loading = use_signal(|| true);
    let mut approved_today = use_signal({
        let backend = backend.clone();
        move || backend.local().approved_today(Zoned::now().date())
    });

    use_effect({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            spawn(async move {
                loading.set(true);
                match backend.pending_courses().await {
                    Ok(courses) => records.write().replace_all(courses),
                    Err(e) => toast.error(e),
                }
                loading.set(false);
            });
        }
    });

    let decide = move |(id, status): (String, ApprovalStatus)| {
        // Decided courses leave the pending list.
        if !records.write().begin(&id, Change::Remove) {
            return;
        }
        let backend = backend.clone();
        spawn(async move {
            let result = match status {
                ApprovalStatus::Approved => backend.approve_course(&id).await,
                _ => backend.reject_course(&id).await,
            };
            if let Err(e) = result {
                tracing::error!(%id, error = %e, "deciding course failed");
                records.write().reject(&id, e.to_string());
                toast.error(e);
                return;
            }
            records.write().apply(&id);
            if status == ApprovalStatus::Approved {
                match backend.local().record_approval(Zoned::now().date()) {
                    Ok(count) => approved_today.set(count),
                    Err(e) => tracing::warn!(error = %e, "could not persist approval count"),
                }
            }
            tracing::info!(%id, status = status.label(), "course decided");
            toast.success(format!("Course {}.", status.label().to_lowercase()));
        });
    };

    let pending = records.read().len();
    let shown: Vec<Course> = records
        .read()
        .visible()
        .filter(|c| c.matches(&query.read()))
        .cloned()
        .collect();

    rsx! {
        div {
            PageHeader {
                title: "Course Approvals",
                subtitle: "Review courses submitted by faculty.",
                SearchInput {
                    value: query(),
                    placeholder: "Search code, title, faculty, slot or status",
                    on_input: move |value| query.set(value),
                }
            }

            div { class: "stat-row",
                div { class: "stat-card",
                    span { class: "stat-value", "{pending}" }
                    span { class: "stat-label", "Pending" }
                }
                div { class: "stat-card",
                    span { class: "stat-value", "{approved_today}" }
                    span { class: "stat-label", "Approved Today" }
                }
            }

            if loading() {
                div { class: "loading", "Loading courses..." }
            } else if pending == 0 {
                EmptyState {
                    title: "All Caught Up",
                    detail: "There are no courses waiting for approval.",
                }
            } else if shown.is_empty() {
                div { class: "empty-message", "No courses match your search." }
            } else {
                div { class: "table-container",
                    table {
                        thead {
                            tr {
                                th { "Code" }
                                th { "Title" }
                                th { "Faculty" }
                                th { "Slot" }
                                th { "Seats" }
                                th { "Submitted" }
                                th { "Status" }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            for course in shown {
                                CourseRow {
                                    key: "{course.id}",
                                    state: records.read().state(&course.id),
                                    course,
                                    on_decide: {
                                        let mut decide = decide.clone();
                                        move |decision: (String, ApprovalStatus)| decide(decision)
                                    },
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CourseRow(
    course: Course,
    state: MutationState,
    on_decide: EventHandler<(String, ApprovalStatus)>,
) -> Element {
    let busy = state.is_pending();
    let approve = (course.id.clone(), ApprovalStatus::Approved);
    let reject = (course.id.clone(), ApprovalStatus::Rejected);

    rsx! {
        tr {
            td { "{course.code}" }
            td { "{course.title}" }
            td { "{course.faculty}" }
            td { "{course.slot}" }
            td { "{course.seats}" }
            td { "{course.created_at}" }
            td {
                StatusBadge { status: course.approval_status }
            }
            td { class: "actions",
                button {
                    class: "btn btn-small btn-primary",
                    disabled: busy,
                    onclick: move |_| on_decide.call(approve.clone()),
                    "Approve"
                }
                button {
                    class: "btn btn-small btn-danger",
                    disabled: busy,
                    onclick: move |_| on_decide.call(reject.clone()),
                    "Reject"
                }
                MutationNote { state: state.clone() }
            }
        }
    }
}
