use crate::{
    backend::use_backend,
    toast::use_toast,
    views::components::{MutationNote, PageHeader, SearchInput},
};
use api::CampusRepository;
use dioxus::prelude::*;
use jiff::{Timestamp, tz::TimeZone};
use types::notification::{
    NotificationFilter, NotificationKind, ReadStatus, StatusFilter, TeacherNotification,
    relative_time,
};
use ui::mutation::{Change, MutationState, RecordSet};

#[component]
pub fn TeacherNotifications() -> Element {
    let backend = use_backend();
    let mut toast = use_toast();
    let mut records = use_signal(RecordSet::<TeacherNotification>::default);
    let mut filter = use_signal(NotificationFilter::default);
    let mut loading = use_signal(|| true);

    use_effect({
        let backend = backend.clone();
        move || {
            let backend = backend.clone();
            spawn(async move {
                loading.set(true);
                match backend.teacher_notifications().await {
                    Ok(mut n) => {
                        n.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                        records.write().replace_all(n);
                    }
                    Err(e) => toast.error(e),
                }
                loading.set(false);
            });
        }
    });

    let mark_read = move |id: String| {
        let began = records
            .write()
            .begin(&id, Change::update(|n: &mut TeacherNotification| n.status = ReadStatus::Read));
        if !began {
            return;
        }
        let backend = backend.clone();
        spawn(async move {
            match backend.mark_notification_read(&id).await {
                Ok(()) => records.write().apply(&id),
                Err(e) => {
                    tracing::error!(%id, error = %e, "marking notification read failed");
                    records.write().reject(&id, e.to_string());
                    toast.error(e);
                }
            }
        });
    };

    let now = Timestamp::now();
    let tz = TimeZone::system();
    let unread = records.read().visible().filter(|n| n.is_unread()).count();
    let shown: Vec<TeacherNotification> = records
        .read()
        .visible()
        .filter(|n| filter.read().matches(n))
        .cloned()
        .collect();
    let current = filter();
    let kind_value = current.kind.map(NotificationKind::as_str).unwrap_or("all");
    let status_value = match current.status {
        StatusFilter::All => "all",
        StatusFilter::Read => "read",
        StatusFilter::Unread => "unread",
    };

    rsx! {
        div {
            PageHeader {
                title: "Notifications",
                subtitle: "{unread} unread",
                button {
                    class: "btn btn-secondary",
                    disabled: unread == 0,
                    onclick: move |_| {
                        records.write().modify_all(|n| n.status = ReadStatus::Read);
                    },
                    "Mark All Read"
                }
            }

            div { class: "filter-bar",
                SearchInput {
                    value: current.query.clone(),
                    placeholder: "Search title, message or sender",
                    on_input: move |value| filter.write().query = value,
                }
                select {
                    class: "form-input",
                    value: status_value,
                    onchange: move |e| filter.write().status = StatusFilter::parse(&e.value()),
                    option { value: "all", "All" }
                    option { value: "unread", "Unread" }
                    option { value: "read", "Read" }
                }
                select {
                    class: "form-input",
                    value: kind_value,
                    onchange: move |e| filter.write().kind = NotificationKind::parse(&e.value()),
                    option { value: "all", "All types" }
                    for kind in NotificationKind::ALL.map(NotificationKind::as_str) {
                        option { key: "{kind}", value: kind, "{kind}" }
                    }
                }
            }

            if loading() {
                div { class: "loading", "Loading notifications..." }
            } else if shown.is_empty() {
                div { class: "empty-message", "No notifications match your filters." }
            } else {
                ul { class: "notification-list",
                    for notification in shown {
                        NotificationRow {
                            key: "{notification.id}",
                            state: records.read().state(&notification.id),
                            age: relative_time(notification.timestamp, now, &tz),
                            notification,
                            on_read: {
                                let mut mark_read = mark_read.clone();
                                move |id: String| mark_read(id)
                            },
                            on_unread: move |id: String| {
                                records.write().modify(&id, |n| n.status = ReadStatus::Unread);
                            },
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NotificationRow(
    notification: TeacherNotification,
    state: MutationState,
    age: String,
    on_read: EventHandler<String>,
    on_unread: EventHandler<String>,
) -> Element {
    let unread = notification.is_unread();
    let priority = notification.priority.as_str();
    let kind = notification.kind.as_str();
    let id = notification.id.clone();

    rsx! {
        li {
            class: "notification",
            class: if unread { "unread" },
            div { class: "notification-header",
                span { class: "notification-title", "{notification.title}" }
                span { class: "priority priority-{priority}", "{priority}" }
                span { class: "kind-tag", "{kind}" }
                span { class: "notification-age", "{age}" }
            }
            p { class: "notification-message", "{notification.message}" }
            div { class: "notification-footer",
                span { class: "text-muted", "From {notification.sender}" }
                MutationNote { state: state.clone() }
                if unread {
                    button {
                        class: "btn btn-small",
                        disabled: state.is_pending(),
                        onclick: move |_| on_read.call(id.clone()),
                        "Mark Read"
                    }
                } else {
                    button {
                        class: "btn btn-small btn-secondary",
                        onclick: move |_| on_unread.call(id.clone()),
                        "Mark Unread"
                    }
                }
            }
        }
    }
}
