use dioxus::prelude::*;

mod backend;
mod toast;
mod views;

use backend::Backend;
use toast::{ToastBanner, ToastState};
use views::{
    AttendanceMarking, ClassroomAllocation, ClassroomRequests, CourseApprovals, Home,
    InternalMarks, StudentDashboard, StudentEnrollment, TeacherNotifications,
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(PortalLayout)]
        #[route("/")]
        Home {},
        #[route("/student")]
        StudentDashboard {},
        #[route("/student/enrollment")]
        StudentEnrollment {},
        #[route("/teacher/attendance")]
        AttendanceMarking {},
        #[route("/teacher/marks")]
        InternalMarks {},
        #[route("/teacher/notifications")]
        TeacherNotifications {},
        #[route("/teacher/classrooms")]
        ClassroomRequests {},
        #[route("/admin/courses")]
        CourseApprovals {},
        #[route("/admin/classrooms")]
        ClassroomAllocation {},
}

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Smart Campus" }
        document::Link { rel: "icon", href: asset!("/assets/favicon.svg") }
        document::Link { rel: "stylesheet", href: asset!("/assets/main.css") }

        Router::<Route> {}
    }
}

#[component]
fn NavLink(to: Route, children: Element) -> Element {
    let current_route: Route = use_route();
    let is_active = current_route == to;

    rsx! {
        Link {
            to,
            class: if is_active { "active" },
            {children}
        }
    }
}

#[component]
fn PortalLayout() -> Element {
    use_context_provider(ToastState::new);
    let backend = use_resource(Backend::bootstrap);

    match &*backend.read() {
        Some(backend) => rsx! {
            Portal { backend: backend.clone() }
        },
        None => rsx! {
            div { class: "loading", "Loading..." }
        },
    }
}

#[component]
fn Portal(backend: Backend) -> Element {
    let demo = backend.is_demo();
    use_context_provider(|| backend);

    rsx! {
        div { class: "app-layout",
            // Sidebar
            aside { class: "sidebar",
                div { class: "sidebar-header",
                    span { class: "sidebar-logo", "Smart Campus" }
                    if demo {
                        span { class: "sidebar-badge", "Demo" }
                    }
                }
                nav { class: "sidebar-nav",
                    NavLink { to: Route::Home {}, "Overview" }

                    div { class: "sidebar-section", "Student" }
                    NavLink { to: Route::StudentDashboard {}, "Dashboard" }
                    NavLink { to: Route::StudentEnrollment {}, "Enrollment" }

                    div { class: "sidebar-section", "Teacher" }
                    NavLink { to: Route::AttendanceMarking {}, "Attendance" }
                    NavLink { to: Route::InternalMarks {}, "Internal Marks" }
                    NavLink { to: Route::TeacherNotifications {}, "Notifications" }
                    NavLink { to: Route::ClassroomRequests {}, "Classroom Requests" }

                    div { class: "sidebar-section", "Admin" }
                    NavLink { to: Route::CourseApprovals {}, "Course Approvals" }
                    NavLink { to: Route::ClassroomAllocation {}, "Classroom Allocation" }
                }
            }
            // Main content
            main { class: "main-content",
                ToastBanner {}
                Outlet::<Route> {}
            }
        }
    }
}
