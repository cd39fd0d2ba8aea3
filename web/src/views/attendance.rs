use std::collections::HashMap;

use crate::{
    backend::{Backend, use_backend},
    toast::use_toast,
    views::components::{CourseSelect, PageHeader},
};
use api::CampusRepository;
use dioxus::prelude::*;
use jiff::{Zoned, civil::Date};
use types::{
    attendance::AttendanceSheet,
    course::{ApprovalStatus, Course},
};
use ui::{
    EmptyState,
    calendar::day_label,
    roster::{RosterState, roster_state},
};

/// A roster being marked for one course on the day it was loaded.
#[derive(Debug, Clone, PartialEq)]
struct Marking {
    course_id: String,
    day: Date,
    sheet: AttendanceSheet,
}

#[component]
pub fn AttendanceMarking() -> Element {
    let backend = use_backend();
    let mut toast = use_toast();
    let mut courses = use_signal(Vec::<Course>::new);
    let mut selected = use_signal(|| None::<String>);
    let mut marking = use_signal(|| None::<Marking>);
    let mut saved_at = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    use_effect({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            spawn(async move {
                match backend.teacher_courses().await {
                    Ok(all) => courses.set(
                        all.into_iter()
                            .filter(|c| c.approval_status == ApprovalStatus::Approved)
                            .collect(),
                    ),
                    Err(e) => toast.error(e),
                }
            });
        }
    });

    // Switching course cancels the previous roster request.
    let mut roster = use_resource({
        let backend = backend.clone();
        move || load_sheet(backend.clone(), selected())
    });

    use_effect(move || match &*roster.read() {
        Some(Some((course_id, Ok((day, sheet))))) => marking.set(Some(Marking {
            course_id: course_id.clone(),
            day: *day,
            sheet: sheet.clone(),
        })),
        Some(Some((course_id, Err(e)))) => {
            tracing::warn!(%course_id, error = %e, "loading roster failed");
            marking.set(None);
            toast.error(e);
        }
        _ => {}
    });

    let save = move |_: MouseEvent| {
        let Some(current) = marking() else {
            return;
        };
        let today = Zoned::now().date();
        if current.day != today {
            // The roster's OD coverage was worked out for another day.
            toast.error(format!(
                "The date changed to {}. Reloading the roster.",
                day_label(today)
            ));
            roster.restart();
            return;
        }
        let course_id = current.course_id.clone();
        let submission = current.sheet.submission(&course_id, today);
        let backend = backend.clone();
        spawn(async move {
            saving.set(true);
            match backend.submit_attendance(&submission).await {
                Ok(()) => {
                    let at = Zoned::now().strftime("%H:%M").to_string();
                    tracing::info!(%course_id, entries = submission.entries.len(), "attendance saved");
                    saved_at.write().insert(course_id, at);
                    toast.success("Attendance saved.");
                }
                Err(e) => {
                    tracing::error!(%course_id, error = %e, "saving attendance failed");
                    toast.error(e);
                }
            }
            saving.set(false);
        });
    };

    let roster_status = roster_state(
        selected().as_deref(),
        roster.read().as_ref().and_then(Option::as_ref),
    );
    let course_saved_at = selected().and_then(|id| saved_at.read().get(&id).cloned());
    // The sheet can lag behind the selection while a new roster loads.
    let current_marking = marking().filter(|m| Some(&m.course_id) == selected().as_ref());
    let marking_day = current_marking
        .as_ref()
        .map(|m| m.day)
        .unwrap_or_else(|| Zoned::now().date());
    let subtitle = format!(
        "Marking for {}. Ticked students are present.",
        day_label(marking_day)
    );

    rsx! {
        div {
            PageHeader {
                title: "Attendance",
                subtitle,
                CourseSelect {
                    courses: courses(),
                    selected: selected(),
                    on_select: move |id| selected.set(id),
                }
            }

            if roster_status == RosterState::Unselected {
                div { class: "empty-message", "Select a course to load its roster." }
            } else if let RosterState::Failed(reason) = &roster_status {
                EmptyState { title: "Could Not Load Roster", detail: reason.clone() }
                div { class: "form-actions",
                    button { class: "btn btn-secondary", onclick: move |_| roster.restart(), "Retry" }
                }
            } else if let Some(current) = current_marking.filter(|_| roster_status == RosterState::Ready) {
                {
                    let current = current.sheet;
                    let totals = current.totals();
                    rsx! {
                        div { class: "totals",
                            span { class: "total total-present", "Present: {totals.present}" }
                            span { class: "total total-absent", "Absent: {totals.absent}" }
                            span { class: "total total-on-duty", "On Duty: {totals.on_duty}" }
                            span { class: "total", "Total: {totals.total}" }
                        }
                        div { class: "toolbar",
                            button {
                                class: "btn btn-secondary",
                                onclick: move |_| {
                                    if let Some(m) = marking.write().as_mut() {
                                        m.sheet.mark_all_present();
                                    }
                                },
                                "Mark All Present"
                            }
                            button {
                                class: "btn btn-secondary",
                                onclick: move |_| {
                                    if let Some(m) = marking.write().as_mut() {
                                        m.sheet.mark_all_absent();
                                    }
                                },
                                "Mark All Absent"
                            }
                            if let Some(at) = course_saved_at {
                                span { class: "text-muted", "Last saved at {at}" }
                            }
                        }
                        div { class: "table-container",
                            table {
                                thead {
                                    tr {
                                        th { "S.No" }
                                        th { "Reg No." }
                                        th { "Name" }
                                        th { "Present" }
                                        th { "Status" }
                                    }
                                }
                                tbody {
                                    for (index, student) in current.students().iter().cloned().enumerate() {
                                        {
                                            let on_duty = current.is_on_duty(&student.reg_no);
                                            let present = current.is_present(&student.reg_no);
                                            let status = current.status(&student.reg_no);
                                            let status_class = status.css_class();
                                            let serial = index + 1;
                                            let reg_no = student.reg_no.clone();
                                            rsx! {
                                                tr { key: "{student.reg_no}",
                                                    class: if on_duty { "on-duty" },
                                                    td { "{serial}" }
                                                    td { "{student.reg_no}" }
                                                    td { "{student.name}" }
                                                    td {
                                                        input {
                                                            r#type: "checkbox",
                                                            checked: present,
                                                            disabled: on_duty,
                                                            title: if on_duty { "Approved OD" },
                                                            onchange: move |_| {
                                                                if let Some(m) = marking.write().as_mut() {
                                                                    m.sheet.toggle(&reg_no);
                                                                }
                                                            },
                                                        }
                                                    }
                                                    td {
                                                        span { class: "status-pill {status_class}", {status.label()} }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        div { class: "form-actions",
                            button {
                                class: "btn btn-primary",
                                disabled: saving() || current.students().is_empty(),
                                onclick: save,
                                if saving() { "Saving..." } else { "Save Attendance" }
                            }
                        }
                    }
                }
            } else {
                div { class: "loading", "Loading roster..." }
            }
        }
    }
}

async fn load_sheet(
    backend: Backend,
    course: Option<String>,
) -> Option<(String, types::Result<(Date, AttendanceSheet)>)> {
    let course = course?;
    let day = Zoned::now().date();
    let sheet = async {
        let students = backend.course_students(&course).await?;
        let ods = backend.approved_ods().await?;
        Ok::<_, types::Error>((day, AttendanceSheet::new(students, &ods, day)))
    }
    .await;
    Some((course, sheet))
}
