//! Data access for the campus portal.
//!
//! Every screen talks to a [`CampusRepository`]. [`HttpRepository`] calls the
//! campus REST backend, [`LocalRepository`] serves persisted placeholder data,
//! and [`FallbackRepository`] combines the two.

mod config;
mod fallback;
mod http;
mod local;
mod seed;
mod store;

pub use config::ApiConfig;
pub use fallback::FallbackRepository;
pub use http::HttpRepository;
pub use local::{LocalData, LocalRepository, SNAPSHOT_KEY};
pub use store::{MemoryStore, Store};

use types::{
    Result,
    attendance::{AttendanceSubmission, OdRecord, Student},
    classroom::{Classroom, NewRoomRequest, RoomRequest},
    course::{Course, Enrollment, SlotOffering},
    marks::MarksSubmission,
    notification::TeacherNotification,
    student::{AttendanceConfirmation, Notice},
};

/// The operations the campus screens need from a backend.
#[allow(async_fn_in_trait)]
pub trait CampusRepository {
    async fn student_notices(&self) -> Result<Vec<Notice>>;
    async fn attendance_confirmations(&self) -> Result<Vec<AttendanceConfirmation>>;

    async fn slot_offerings(&self) -> Result<Vec<SlotOffering>>;
    async fn enrollments(&self) -> Result<Vec<Enrollment>>;
    async fn request_enrollment(&self, slot: &str, course_id: &str) -> Result<Enrollment>;

    async fn teacher_courses(&self) -> Result<Vec<Course>>;
    async fn course_students(&self, course_id: &str) -> Result<Vec<Student>>;
    async fn approved_ods(&self) -> Result<Vec<OdRecord>>;
    async fn submit_attendance(&self, submission: &AttendanceSubmission) -> Result<()>;
    async fn submit_marks(&self, submission: &MarksSubmission) -> Result<()>;

    async fn teacher_notifications(&self) -> Result<Vec<TeacherNotification>>;
    async fn mark_notification_read(&self, id: &str) -> Result<()>;

    async fn classrooms(&self) -> Result<Vec<Classroom>>;
    async fn room_requests(&self) -> Result<Vec<RoomRequest>>;
    async fn create_room_request(&self, request: &NewRoomRequest) -> Result<RoomRequest>;
    async fn all_room_requests(&self) -> Result<Vec<RoomRequest>>;
    async fn approve_room_request(&self, id: &str) -> Result<()>;
    async fn reject_room_request(&self, id: &str) -> Result<()>;

    async fn pending_courses(&self) -> Result<Vec<Course>>;
    async fn approve_course(&self, id: &str) -> Result<()>;
    async fn reject_course(&self, id: &str) -> Result<()>;
}

/// Build the repository the app runs against.
///
/// In demo mode only local data is used. Otherwise the backend is primary and
/// local data backs up failed reads.
pub fn connect(config: ApiConfig, local: LocalRepository) -> FallbackRepository<HttpRepository> {
    let primary = (!config.demo_mode).then(|| HttpRepository::new(config.base_url, config.token));
    FallbackRepository::new(primary, local)
}
