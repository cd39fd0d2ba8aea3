use crate::Route;
use dioxus::prelude::*;

#[component]
fn HomeCard(to: Route, title: String, description: String) -> Element {
    rsx! {
        Link { to, class: "dashboard-card",
            h3 { class: "dashboard-card-title", "{title}" }
            p { class: "dashboard-card-desc", "{description}" }
        }
    }
}

#[component]
pub fn Home() -> Element {
    rsx! {
        div {
            div { class: "page-header",
                h1 { class: "page-title", "Smart Campus" }
                p { class: "page-subtitle", "Attendance, courses, marks and classrooms in one place." }
            }

            h2 { class: "section-header", "Student" }
            div { class: "dashboard-grid",
                HomeCard {
                    to: Route::StudentDashboard {},
                    title: "Dashboard",
                    description: "Holiday calendar, notices and attendance confirmations.",
                }
                HomeCard {
                    to: Route::StudentEnrollment {},
                    title: "Enrollment",
                    description: "Pick one course per slot and request enrollment.",
                }
            }

            h2 { class: "section-header", "Teacher" }
            div { class: "dashboard-grid",
                HomeCard {
                    to: Route::AttendanceMarking {},
                    title: "Attendance",
                    description: "Mark today's attendance. Students on duty stay present.",
                }
                HomeCard {
                    to: Route::InternalMarks {},
                    title: "Internal Marks",
                    description: "Enter assessment marks for a course.",
                }
                HomeCard {
                    to: Route::TeacherNotifications {},
                    title: "Notifications",
                    description: "Search, filter and mark notifications as read.",
                }
                HomeCard {
                    to: Route::ClassroomRequests {},
                    title: "Classroom Requests",
                    description: "Request a room for a slot and track its status.",
                }
            }

            h2 { class: "section-header", "Admin" }
            div { class: "dashboard-grid",
                HomeCard {
                    to: Route::CourseApprovals {},
                    title: "Course Approvals",
                    description: "Approve or reject courses waiting for review.",
                }
                HomeCard {
                    to: Route::ClassroomAllocation {},
                    title: "Classroom Allocation",
                    description: "Decide room requests without double-booking.",
                }
            }
        }
    }
}
