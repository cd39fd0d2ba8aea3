use crate::{
    backend::{Backend, use_backend},
    toast::use_toast,
    views::components::{CourseSelect, PageHeader},
};
use api::CampusRepository;
use dioxus::prelude::*;
use types::{
    attendance::Student,
    course::{ApprovalStatus, Course},
    marks::MarksSheet,
};
use ui::{
    EmptyState,
    roster::{RosterState, roster_state},
};

const COMPETENCIES: [&str; 4] = ["Level 1", "Level 2", "Level 3", "Level 4"];

#[component]
pub fn InternalMarks() -> Element {
    let backend = use_backend();
    let mut toast = use_toast();
    let mut courses = use_signal(Vec::<Course>::new);
    let mut sheet = use_signal(MarksSheet::default);
    let mut flagged = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

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

    let course_id = use_memo(move || sheet.read().course_id.clone());
    let mut roster = use_resource({
        let backend = backend.clone();
        move || load_roster(backend.clone(), course_id())
    });

    use_effect(move || match &*roster.read() {
        Some(Some((course, Ok(students)))) => {
            // Ignore a roster that arrives for a course no longer selected.
            if sheet.peek().course_id.as_ref() == Some(course) {
                sheet.write().set_roster(students.clone());
            }
        }
        Some(Some((course, Err(e)))) => {
            tracing::warn!(%course, error = %e, "loading roster failed");
            toast.error(e);
        }
        _ => {}
    });

    let submit = move |_: MouseEvent| {
        let submission = match sheet.read().validate() {
            Ok(submission) => submission,
            Err(e) => {
                flagged.set(e.reg_no().map(str::to_string));
                toast.error(e);
                return;
            }
        };
        flagged.set(None);
        let backend = backend.clone();
        spawn(async move {
            submitting.set(true);
            match backend.submit_marks(&submission).await {
                Ok(()) => {
                    tracing::info!(
                        course_id = %submission.course_id,
                        test = %submission.test_name,
                        students = submission.marks.len(),
                        "marks submitted"
                    );
                    sheet.write().reset();
                    toast.success("Marks submitted.");
                }
                Err(e) => {
                    tracing::error!(error = %e, "submitting marks failed");
                    toast.error(e);
                }
            }
            submitting.set(false);
        });
    };

    let current = sheet();
    let roster_status = roster_state(
        current.course_id.as_deref(),
        roster.read().as_ref().and_then(Option::as_ref),
    );

    rsx! {
        div {
            PageHeader {
                title: "Internal Marks",
                subtitle: "Enter marks as a percentage. Enter zero for absent students.",
            }

            div { class: "card",
                div { class: "form-row",
                    div { class: "form-group",
                        label { class: "form-label", r#for: "test_name", "Name of the Test" }
                        input {
                            id: "test_name",
                            class: "form-input",
                            r#type: "text",
                            placeholder: "e.g. Internal Assessment 1",
                            value: "{current.test_name}",
                            oninput: move |e| sheet.write().test_name = e.value(),
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "competency", "Competency" }
                        select {
                            id: "competency",
                            class: "form-input",
                            value: "{current.competency}",
                            onchange: move |e| sheet.write().competency = e.value(),
                            option { value: "", "Select competency" }
                            for level in COMPETENCIES {
                                option {
                                    key: "{level}",
                                    value: level,
                                    selected: current.competency == level,
                                    "{level}"
                                }
                            }
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", "Course" }
                        CourseSelect {
                            courses: courses(),
                            selected: current.course_id.clone(),
                            on_select: move |id: Option<String>| {
                                if sheet.peek().course_id == id {
                                    return;
                                }
                                flagged.set(None);
                                let mut draft = sheet.write();
                                draft.course_id = id;
                                draft.set_roster(Vec::new());
                            },
                        }
                    }
                }

                if roster_status == RosterState::Unselected {
                    div { class: "empty-message", "Select a course to enter marks." }
                } else if let RosterState::Failed(reason) = &roster_status {
                    EmptyState { title: "Could Not Load Students", detail: reason.clone() }
                    div { class: "form-actions",
                        button { class: "btn btn-secondary", onclick: move |_| roster.restart(), "Retry" }
                    }
                } else if roster_status == RosterState::Loading {
                    div { class: "loading", "Loading students..." }
                } else if current.students().is_empty() {
                    div { class: "empty-message", "No students are enrolled in this course." }
                } else {
                    div { class: "table-container",
                        table {
                            thead {
                                tr {
                                    th { "S.No" }
                                    th { "Reg No." }
                                    th { "Name" }
                                    th { "Mark %" }
                                }
                            }
                            tbody {
                                for (index, student) in current.students().iter().cloned().enumerate() {
                                    {
                                        let serial = index + 1;
                                        let mark = current.mark(&student.reg_no).to_string();
                                        let is_flagged = flagged().as_deref() == Some(student.reg_no.as_str());
                                        let reg_no = student.reg_no.clone();
                                        rsx! {
                                            tr { key: "{student.reg_no}",
                                                class: if is_flagged { "flagged" },
                                                td { "{serial}" }
                                                td { "{student.reg_no}" }
                                                td { "{student.name}" }
                                                td {
                                                    input {
                                                        class: "form-input mark-input",
                                                        r#type: "text",
                                                        inputmode: "decimal",
                                                        placeholder: "0-100",
                                                        value: "{mark}",
                                                        oninput: move |e| {
                                                            // Anything that is not mark-shaped is dropped.
                                                            sheet.write().set_mark(&reg_no, &e.value());
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
                }

                div { class: "form-actions",
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| {
                            flagged.set(None);
                            sheet.write().reset();
                        },
                        "Reset"
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: submitting(),
                        onclick: submit,
                        if submitting() { "Submitting..." } else { "Submit" }
                    }
                }
            }
        }
    }
}

async fn load_roster(
    backend: Backend,
    course: Option<String>,
) -> Option<(String, types::Result<Vec<Student>>)> {
    let course = course?;
    let students = backend.course_students(&course).await;
    Some((course, students))
}
