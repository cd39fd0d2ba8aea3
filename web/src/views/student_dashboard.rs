use crate::{backend::use_backend, toast::use_toast};
use api::CampusRepository;
use dioxus::prelude::*;
use jiff::Zoned;
use types::student::{AttendanceConfirmation, Notice};
use ui::{
    EmptyState, HolidayCalendar, Overlay, Panel,
    calendar::CalendarState,
    panel::PanelKey,
    use_panels,
};

#[component]
pub fn StudentDashboard() -> Element {
    let backend = use_backend();
    let mut toast = use_toast();
    let mut panels = use_panels();
    let calendar = use_signal(|| CalendarState::new(Zoned::now().date()));
    let mut notices = use_signal(Vec::<Notice>::new);
    let mut confirmations = use_signal(Vec::<AttendanceConfirmation>::new);
    let mut loading = use_signal(|| true);

    // Fetch notices and attendance confirmations on mount
    use_effect(move || {
        let backend = backend.clone();
        spawn(async move {
            loading.set(true);
            match backend.student_notices().await {
                Ok(n) => notices.set(n),
                Err(e) => toast.error(e),
            }
            match backend.attendance_confirmations().await {
                Ok(a) => confirmations.set(a),
                Err(e) => toast.error(e),
            }
            loading.set(false);
        });
    });

    // Inline and maximized copies of a panel render the same body.
    let body = move |key: PanelKey| -> Element {
        if loading() && key != PanelKey::Holiday {
            return rsx! {
                div { class: "loading", "Loading..." }
            };
        }
        match key {
            PanelKey::Holiday => rsx! {
                HolidayCalendar { state: calendar }
            },
            PanelKey::Notifications => rsx! {
                NoticeList { notices: notices() }
            },
            PanelKey::Attendance => rsx! {
                ConfirmationList { confirmations: confirmations() }
            },
        }
    };

    rsx! {
        div { class: "student-dashboard",
            div { class: "dashboard-columns",
                div { class: "dashboard-left",
                    div { class: "dashboard-slot slot-holiday",
                        Panel {
                            panel: PanelKey::Holiday,
                            maximized: panels.is_maximized(PanelKey::Holiday),
                            on_toggle: move |_| {
                                panels.toggle(PanelKey::Holiday);
                            },
                            {body(PanelKey::Holiday)}
                        }
                    }
                    div { class: "dashboard-slot slot-attendance",
                        Panel {
                            panel: PanelKey::Attendance,
                            maximized: panels.is_maximized(PanelKey::Attendance),
                            on_toggle: move |_| {
                                panels.toggle(PanelKey::Attendance);
                            },
                            {body(PanelKey::Attendance)}
                        }
                    }
                }
                div { class: "dashboard-right",
                    Panel {
                        panel: PanelKey::Notifications,
                        maximized: panels.is_maximized(PanelKey::Notifications),
                        on_toggle: move |_| {
                            panels.toggle(PanelKey::Notifications);
                        },
                        {body(PanelKey::Notifications)}
                    }
                }
            }

            if let Some(key) = panels.maximized() {
                Overlay {
                    on_dismiss: move |_| {
                        panels.close();
                    },
                    Panel {
                        panel: key,
                        maximized: true,
                        on_toggle: move |_| {
                            panels.close();
                        },
                        {body(key)}
                    }
                }
            }
        }
    }
}

#[component]
fn NoticeList(notices: Vec<Notice>) -> Element {
    if notices.is_empty() {
        return rsx! {
            EmptyState {
                title: "No Notifications",
                detail: "Notices from campus offices will appear here.",
            }
        };
    }

    rsx! {
        div { class: "scroll-list",
            for notice in notices {
                NoticeItem { key: "{notice.id}", notice }
            }
        }
    }
}

#[component]
fn NoticeItem(notice: Notice) -> Element {
    let initial = notice.initial();

    rsx! {
        div { class: "notice",
            div { class: "notice-avatar", "{initial}" }
            div { class: "notice-content",
                div { class: "notice-meta",
                    span { class: "notice-sender", "{notice.by}" }
                    " on {notice.date_label}"
                }
                div { class: "notice-body", "{notice.body}" }
                if notice.has_download {
                    if let Some(url) = notice.download_url.clone() {
                        a {
                            class: "btn btn-small btn-primary",
                            href: url,
                            target: "_blank",
                            rel: "noopener noreferrer",
                            "Download"
                        }
                    } else {
                        button { class: "btn btn-small", disabled: true, "Download" }
                    }
                }
            }
        }
    }
}

#[component]
fn ConfirmationList(confirmations: Vec<AttendanceConfirmation>) -> Element {
    if confirmations.is_empty() {
        return rsx! {
            EmptyState {
                title: "No Attendance Notifications",
                detail: "Recent attendance confirmations will appear here.",
            }
        };
    }

    rsx! {
        div { class: "scroll-list",
            for item in confirmations {
                ConfirmationItem { key: "{item.id}", item }
            }
        }
    }
}

#[component]
fn ConfirmationItem(item: AttendanceConfirmation) -> Element {
    let status_class = item.status.css_class();

    rsx! {
        div { class: "confirmation",
            div { class: "confirmation-content",
                div { class: "confirmation-course", "{item.course_code} - {item.course_name}" }
                div { class: "confirmation-meta", "{item.date} • Marked by {item.marked_by}" }
            }
            span { class: "status-pill {status_class}", {item.status.label()} }
        }
    }
}
