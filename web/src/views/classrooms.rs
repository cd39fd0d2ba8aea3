use crate::{
    backend::use_backend,
    toast::use_toast,
    views::components::{CourseSelect, MutationNote, PageHeader, StatusBadge},
};
use api::CampusRepository;
use dioxus::prelude::*;
use jiff::{
    Zoned,
    civil::{Date, Time},
};
use types::{
    classroom::{Classroom, RoomRequest, RoomRequestDraft, has_approved_clash},
    course::{ApprovalStatus, Course},
};
use ui::{
    EmptyState,
    mutation::{Change, MutationState, RecordSet},
};

#[component]
pub fn ClassroomRequests() -> Element {
    let backend = use_backend();
    let mut toast = use_toast();
    let mut courses = use_signal(Vec::<Course>::new);
    let mut rooms = use_signal(Vec::<Classroom>::new);
    let mut requests = use_signal(Vec::<RoomRequest>::new);
    let mut draft = use_signal(|| RoomRequestDraft::new(Zoned::now().date()));
    let mut loading = use_signal(|| true);
    let mut sending = use_signal(|| false);

    use_effect({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            spawn(async move {
                loading.set(true);
                match backend.teacher_courses().await {
                    Ok(all) => courses.set(
                        all.into_iter()
                            .filter(|c| c.approval_status == ApprovalStatus::Approved)
                            .collect(),
                    ),
                    Err(e) => toast.error(e),
                }
                match backend.classrooms().await {
                    Ok(all) => rooms.set(all),
                    Err(e) => toast.error(e),
                }
                match backend.room_requests().await {
                    Ok(mine) => requests.set(mine),
                    Err(e) => toast.error(e),
                }
                loading.set(false);
            });
        }
    });

    let submit = move |_: MouseEvent| {
        let form = draft();
        let course = courses
            .read()
            .iter()
            .find(|c| Some(&c.id) == form.course_id.as_ref())
            .cloned();
        let room = rooms
            .read()
            .iter()
            .find(|r| r.code == form.classroom_id)
            .cloned();
        let body = match form.validate(course.as_ref(), room.as_ref()) {
            Ok(body) => body,
            Err(e) => {
                toast.error(e);
                return;
            }
        };
        let backend = backend.clone();
        spawn(async move {
            sending.set(true);
            match backend.create_room_request(&body).await {
                Ok(created) => {
                    tracing::info!(
                        id = %created.id,
                        classroom = %created.classroom_id,
                        date = %created.request_date,
                        "room request created"
                    );
                    requests.write().insert(0, created);
                    draft.set(RoomRequestDraft::new(Zoned::now().date()));
                    toast.success("Room request sent for approval.");
                }
                Err(e) => {
                    tracing::error!(error = %e, "creating room request failed");
                    toast.error(e);
                }
            }
            sending.set(false);
        });
    };

    let current = draft();
    let date_value = current.request_date.map(|d| d.to_string()).unwrap_or_default();
    let start_value = current
        .start_time
        .map(|t| t.strftime("%H:%M").to_string())
        .unwrap_or_default();
    let end_value = current
        .end_time
        .map(|t| t.strftime("%H:%M").to_string())
        .unwrap_or_default();
    let expected_value = match current.expected_students {
        0 => String::new(),
        n => n.to_string(),
    };

    rsx! {
        div {
            PageHeader {
                title: "Classroom Requests",
                subtitle: "Request a room for an extra class, lab or event.",
            }

            div { class: "card",
                h2 { class: "card-title", "New Request" }
                div { class: "form-row",
                    div { class: "form-group",
                        label { class: "form-label", "Course" }
                        CourseSelect {
                            courses: courses(),
                            selected: current.course_id.clone(),
                            on_select: move |id: Option<String>| draft.write().course_id = id,
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "classroom", "Classroom" }
                        select {
                            id: "classroom",
                            class: "form-input",
                            value: "{current.classroom_id}",
                            onchange: move |e| draft.write().classroom_id = e.value(),
                            option { value: "", "Select classroom" }
                            for room in rooms() {
                                {
                                    let label = room.label();
                                    rsx! {
                                        option {
                                            key: "{room.code}",
                                            value: "{room.code}",
                                            selected: current.classroom_id == room.code,
                                            "{label} (capacity {room.capacity})"
                                        }
                                    }
                                }
                            }
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "date", "Date" }
                        input {
                            id: "date",
                            class: "form-input",
                            r#type: "date",
                            value: "{date_value}",
                            oninput: move |e| draft.write().request_date = e.value().parse::<Date>().ok(),
                        }
                    }
                }
                div { class: "form-row",
                    div { class: "form-group",
                        label { class: "form-label", r#for: "start", "Start Time" }
                        input {
                            id: "start",
                            class: "form-input",
                            r#type: "time",
                            value: "{start_value}",
                            oninput: move |e| draft.write().start_time = e.value().parse::<Time>().ok(),
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "end", "End Time" }
                        input {
                            id: "end",
                            class: "form-input",
                            r#type: "time",
                            value: "{end_value}",
                            oninput: move |e| draft.write().end_time = e.value().parse::<Time>().ok(),
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "expected", "Expected Students" }
                        input {
                            id: "expected",
                            class: "form-input",
                            r#type: "number",
                            min: "1",
                            value: "{expected_value}",
                            oninput: move |e| {
                                draft.write().expected_students = e.value().trim().parse().unwrap_or(0);
                            },
                        }
                    }
                }
                div { class: "form-group",
                    label { class: "form-label", r#for: "reason", "Reason" }
                    textarea {
                        id: "reason",
                        class: "form-input",
                        rows: 3,
                        value: "{current.reason}",
                        oninput: move |e| draft.write().reason = e.value(),
                    }
                }
                div { class: "form-actions",
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| draft.set(RoomRequestDraft::new(Zoned::now().date())),
                        "Clear"
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: sending(),
                        onclick: submit,
                        if sending() { "Sending..." } else { "Submit Request" }
                    }
                }
            }

            div { class: "card",
                h2 { class: "card-title", "My Requests" }
                if loading() {
                    div { class: "loading", "Loading requests..." }
                } else if requests.read().is_empty() {
                    EmptyState {
                        title: "No Requests",
                        detail: "Requests you send will appear here with their status.",
                    }
                } else {
                    RoomRequestTable { requests: requests() }
                }
            }
        }
    }
}

/// The label the backend stored, or the raw id when it has none.
fn or_id<'a>(label: &'a str, id: &'a str) -> &'a str {
    if label.is_empty() { id } else { label }
}

#[component]
fn RoomRequestTable(requests: Vec<RoomRequest>) -> Element {
    rsx! {
        div { class: "table-container",
            table {
                thead {
                    tr {
                        th { "Course" }
                        th { "Classroom" }
                        th { "Date" }
                        th { "Time" }
                        th { "Students" }
                        th { "Reason" }
                        th { "Status" }
                    }
                }
                tbody {
                    for request in requests {
                        {
                            let course = or_id(&request.course_label, &request.course_id).to_string();
                            let room = or_id(&request.classroom_label, &request.classroom_id).to_string();
                            let time = request.time_label();
                            rsx! {
                                tr { key: "{request.id}",
                                    td { "{course}" }
                                    td { "{room}" }
                                    td { "{request.request_date}" }
                                    td { "{time}" }
                                    td { "{request.expected_students}" }
                                    td { "{request.reason}" }
                                    td {
                                        StatusBadge { status: request.status }
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

#[component]
pub fn ClassroomAllocation() -> Element {
    let backend = use_backend();
    let mut toast = use_toast();
    let mut records = use_signal(RecordSet::<RoomRequest>::default);
    let mut loading = use_signal(|| true);

    use_effect({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            spawn(async move {
                loading.set(true);
                match backend.all_room_requests().await {
                    Ok(all) => records.write().replace_all(all),
                    Err(e) => toast.error(e),
                }
                loading.set(false);
            });
        }
    });

    let decide = move |(id, status): (String, ApprovalStatus)| {
        let began = records
            .write()
            .begin(&id, Change::update(move |r: &mut RoomRequest| r.status = status));
        if !began {
            return;
        }
        let backend = backend.clone();
        spawn(async move {
            let result = match status {
                ApprovalStatus::Approved => backend.approve_room_request(&id).await,
                _ => backend.reject_room_request(&id).await,
            };
            match result {
                Ok(()) => {
                    tracing::info!(%id, status = status.label(), "room request decided");
                    records.write().apply(&id);
                    toast.success(format!("Request {}.", status.label().to_lowercase()));
                }
                Err(e) => {
                    tracing::error!(%id, error = %e, "deciding room request failed");
                    records.write().reject(&id, e.to_string());
                    toast.error(e);
                }
            }
        });
    };

    let all: Vec<RoomRequest> = records.read().visible().cloned().collect();
    let (pending, decided): (Vec<_>, Vec<_>) = all.iter().cloned().partition(|r| r.is_pending());
    let pending_count = pending.len();

    rsx! {
        div {
            PageHeader {
                title: "Classroom Allocation",
                subtitle: "{pending_count} pending requests",
            }

            if loading() {
                div { class: "loading", "Loading requests..." }
            } else {
                div { class: "card",
                    h2 { class: "card-title", "Pending" }
                    if pending.is_empty() {
                        EmptyState {
                            title: "Nothing Pending",
                            detail: "New room requests from faculty will appear here.",
                        }
                    } else {
                        div { class: "table-container",
                            table {
                                thead {
                                    tr {
                                        th { "Course" }
                                        th { "Requested By" }
                                        th { "Classroom" }
                                        th { "Date" }
                                        th { "Time" }
                                        th { "Students" }
                                        th { "Reason" }
                                        th { "Actions" }
                                    }
                                }
                                tbody {
                                    for request in pending {
                                        PendingRow {
                                            key: "{request.id}",
                                            clash: has_approved_clash(&request, &all),
                                            state: records.read().state(&request.id),
                                            request,
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

                div { class: "card",
                    h2 { class: "card-title", "Decided" }
                    if decided.is_empty() {
                        p { class: "text-muted", "No requests have been decided yet." }
                    } else {
                        RoomRequestTable { requests: decided }
                    }
                }
            }
        }
    }
}

#[component]
fn PendingRow(
    request: RoomRequest,
    clash: bool,
    state: MutationState,
    on_decide: EventHandler<(String, ApprovalStatus)>,
) -> Element {
    let busy = state.is_pending();
    let approve = (request.id.clone(), ApprovalStatus::Approved);
    let reject = (request.id.clone(), ApprovalStatus::Rejected);

    let course = or_id(&request.course_label, &request.course_id).to_string();
    let room = or_id(&request.classroom_label, &request.classroom_id).to_string();
    let time = request.time_label();

    rsx! {
        tr { class: if clash { "clash" },
            td { "{course}" }
            td { "{request.requested_by}" }
            td {
                "{room}"
                if clash {
                    span {
                        class: "clash-warning",
                        title: "Already allocated at this time",
                        " (clash)"
                    }
                }
            }
            td { "{request.request_date}" }
            td { "{time}" }
            td { "{request.expected_students}" }
            td { "{request.reason}" }
            td { class: "actions",
                button {
                    class: "btn btn-small btn-primary",
                    disabled: busy || clash,
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
