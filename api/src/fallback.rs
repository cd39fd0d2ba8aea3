use std::future::Future;

use types::{
    Result,
    attendance::{AttendanceSubmission, OdRecord, Student},
    classroom::{Classroom, NewRoomRequest, RoomRequest},
    course::{Course, Enrollment, SlotOffering},
    marks::MarksSubmission,
    notification::TeacherNotification,
    student::{AttendanceConfirmation, Notice},
};

use crate::{CampusRepository, LocalRepository};

/// A primary backend with local data behind it.
///
/// Reads that fail on the primary are served from local data. Writes never
/// fall back while a primary exists, so the caller sees the failure and can
/// roll back. Without a primary everything is local.
#[derive(Clone)]
pub struct FallbackRepository<P> {
    primary: Option<P>,
    local: LocalRepository,
}

impl<P> FallbackRepository<P> {
    pub fn new(primary: Option<P>, local: LocalRepository) -> Self {
        Self { primary, local }
    }

    pub fn local(&self) -> &LocalRepository {
        &self.local
    }

    pub fn is_demo(&self) -> bool {
        self.primary.is_none()
    }
}

async fn read<T>(
    what: &str,
    primary: Option<impl Future<Output = Result<T>>>,
    local: impl Future<Output = Result<T>>,
) -> Result<T> {
    if let Some(primary) = primary {
        match primary.await {
            Ok(value) => return Ok(value),
            Err(error) => {
                tracing::warn!(kind = ?error.kind, %error, "{what} unavailable, serving local data");
            }
        }
    }
    local.await
}

async fn write<T>(
    primary: Option<impl Future<Output = Result<T>>>,
    local: impl Future<Output = Result<T>>,
) -> Result<T> {
    match primary {
        Some(primary) => primary.await,
        None => local.await,
    }
}

impl<P: CampusRepository> CampusRepository for FallbackRepository<P> {
    async fn student_notices(&self) -> Result<Vec<Notice>> {
        read(
            "student notices",
            self.primary.as_ref().map(|p| p.student_notices()),
            self.local.student_notices(),
        )
        .await
    }

    async fn attendance_confirmations(&self) -> Result<Vec<AttendanceConfirmation>> {
        read(
            "attendance confirmations",
            self.primary.as_ref().map(|p| p.attendance_confirmations()),
            self.local.attendance_confirmations(),
        )
        .await
    }

    async fn slot_offerings(&self) -> Result<Vec<SlotOffering>> {
        read(
            "slot offerings",
            self.primary.as_ref().map(|p| p.slot_offerings()),
            self.local.slot_offerings(),
        )
        .await
    }

    async fn enrollments(&self) -> Result<Vec<Enrollment>> {
        read(
            "enrollments",
            self.primary.as_ref().map(|p| p.enrollments()),
            self.local.enrollments(),
        )
        .await
    }

    async fn request_enrollment(&self, slot: &str, course_id: &str) -> Result<Enrollment> {
        write(
            self.primary
                .as_ref()
                .map(|p| p.request_enrollment(slot, course_id)),
            self.local.request_enrollment(slot, course_id),
        )
        .await
    }

    async fn teacher_courses(&self) -> Result<Vec<Course>> {
        read(
            "teacher courses",
            self.primary.as_ref().map(|p| p.teacher_courses()),
            self.local.teacher_courses(),
        )
        .await
    }

    async fn course_students(&self, course_id: &str) -> Result<Vec<Student>> {
        read(
            "course roster",
            self.primary.as_ref().map(|p| p.course_students(course_id)),
            self.local.course_students(course_id),
        )
        .await
    }

    async fn approved_ods(&self) -> Result<Vec<OdRecord>> {
        read(
            "approved ODs",
            self.primary.as_ref().map(|p| p.approved_ods()),
            self.local.approved_ods(),
        )
        .await
    }

    async fn submit_attendance(&self, submission: &AttendanceSubmission) -> Result<()> {
        write(
            self.primary.as_ref().map(|p| p.submit_attendance(submission)),
            self.local.submit_attendance(submission),
        )
        .await
    }

    async fn submit_marks(&self, submission: &MarksSubmission) -> Result<()> {
        write(
            self.primary.as_ref().map(|p| p.submit_marks(submission)),
            self.local.submit_marks(submission),
        )
        .await
    }

    async fn teacher_notifications(&self) -> Result<Vec<TeacherNotification>> {
        read(
            "teacher notifications",
            self.primary.as_ref().map(|p| p.teacher_notifications()),
            self.local.teacher_notifications(),
        )
        .await
    }

    async fn mark_notification_read(&self, id: &str) -> Result<()> {
        write(
            self.primary.as_ref().map(|p| p.mark_notification_read(id)),
            self.local.mark_notification_read(id),
        )
        .await
    }

    async fn classrooms(&self) -> Result<Vec<Classroom>> {
        read(
            "classrooms",
            self.primary.as_ref().map(|p| p.classrooms()),
            self.local.classrooms(),
        )
        .await
    }

    async fn room_requests(&self) -> Result<Vec<RoomRequest>> {
        read(
            "room requests",
            self.primary.as_ref().map(|p| p.room_requests()),
            self.local.room_requests(),
        )
        .await
    }

    async fn create_room_request(&self, request: &NewRoomRequest) -> Result<RoomRequest> {
        write(
            self.primary.as_ref().map(|p| p.create_room_request(request)),
            self.local.create_room_request(request),
        )
        .await
    }

    async fn all_room_requests(&self) -> Result<Vec<RoomRequest>> {
        read(
            "room requests",
            self.primary.as_ref().map(|p| p.all_room_requests()),
            self.local.all_room_requests(),
        )
        .await
    }

    async fn approve_room_request(&self, id: &str) -> Result<()> {
        write(
            self.primary.as_ref().map(|p| p.approve_room_request(id)),
            self.local.approve_room_request(id),
        )
        .await
    }

    async fn reject_room_request(&self, id: &str) -> Result<()> {
        write(
            self.primary.as_ref().map(|p| p.reject_room_request(id)),
            self.local.reject_room_request(id),
        )
        .await
    }

    async fn pending_courses(&self) -> Result<Vec<Course>> {
        read(
            "pending courses",
            self.primary.as_ref().map(|p| p.pending_courses()),
            self.local.pending_courses(),
        )
        .await
    }

    async fn approve_course(&self, id: &str) -> Result<()> {
        write(
            self.primary.as_ref().map(|p| p.approve_course(id)),
            self.local.approve_course(id),
        )
        .await
    }

    async fn reject_course(&self, id: &str) -> Result<()> {
        write(
            self.primary.as_ref().map(|p| p.reject_course(id)),
            self.local.reject_course(id),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use pretty_assertions::assert_eq;
    use types::{Error, ErrorKind, err};

    /// A backend that is down: every call fails, and calls are counted.
    #[derive(Default)]
    struct Offline {
        calls: Cell<usize>,
    }

    impl Offline {
        fn fail<T>(&self) -> Result<T> {
            self.calls.set(self.calls.get() + 1);
            Err(Error::new(ErrorKind::Status(503), "maintenance"))
        }
    }

    impl CampusRepository for Offline {
        async fn student_notices(&self) -> Result<Vec<Notice>> {
            self.fail()
        }
        async fn attendance_confirmations(&self) -> Result<Vec<AttendanceConfirmation>> {
            self.fail()
        }
        async fn slot_offerings(&self) -> Result<Vec<SlotOffering>> {
            self.fail()
        }
        async fn enrollments(&self) -> Result<Vec<Enrollment>> {
            self.fail()
        }
        async fn request_enrollment(&self, _: &str, _: &str) -> Result<Enrollment> {
            self.fail()
        }
        async fn teacher_courses(&self) -> Result<Vec<Course>> {
            self.fail()
        }
        async fn course_students(&self, _: &str) -> Result<Vec<Student>> {
            self.fail()
        }
        async fn approved_ods(&self) -> Result<Vec<OdRecord>> {
            self.fail()
        }
        async fn submit_attendance(&self, _: &AttendanceSubmission) -> Result<()> {
            self.fail()
        }
        async fn submit_marks(&self, _: &MarksSubmission) -> Result<()> {
            self.fail()
        }
        async fn teacher_notifications(&self) -> Result<Vec<TeacherNotification>> {
            self.fail()
        }
        async fn mark_notification_read(&self, _: &str) -> Result<()> {
            self.fail()
        }
        async fn classrooms(&self) -> Result<Vec<Classroom>> {
            self.fail()
        }
        async fn room_requests(&self) -> Result<Vec<RoomRequest>> {
            self.fail()
        }
        async fn create_room_request(&self, _: &NewRoomRequest) -> Result<RoomRequest> {
            self.fail()
        }
        async fn all_room_requests(&self) -> Result<Vec<RoomRequest>> {
            self.fail()
        }
        async fn approve_room_request(&self, _: &str) -> Result<()> {
            self.fail()
        }
        async fn reject_room_request(&self, _: &str) -> Result<()> {
            self.fail()
        }
        async fn pending_courses(&self) -> Result<Vec<Course>> {
            self.fail()
        }
        async fn approve_course(&self, _: &str) -> Result<()> {
            self.fail()
        }
        async fn reject_course(&self, _: &str) -> Result<()> {
            self.fail()
        }
    }

    /// A backend that answers reads with nothing and accepts writes.
    struct Empty;

    impl Empty {
        fn refuse<T>() -> Result<T> {
            Err(err!("not used in these tests"))
        }
    }

    impl CampusRepository for Empty {
        async fn student_notices(&self) -> Result<Vec<Notice>> {
            Ok(vec![])
        }
        async fn attendance_confirmations(&self) -> Result<Vec<AttendanceConfirmation>> {
            Ok(vec![])
        }
        async fn slot_offerings(&self) -> Result<Vec<SlotOffering>> {
            Ok(vec![])
        }
        async fn enrollments(&self) -> Result<Vec<Enrollment>> {
            Ok(vec![])
        }
        async fn request_enrollment(&self, _: &str, _: &str) -> Result<Enrollment> {
            Self::refuse()
        }
        async fn teacher_courses(&self) -> Result<Vec<Course>> {
            Ok(vec![])
        }
        async fn course_students(&self, _: &str) -> Result<Vec<Student>> {
            Ok(vec![])
        }
        async fn approved_ods(&self) -> Result<Vec<OdRecord>> {
            Ok(vec![])
        }
        async fn submit_attendance(&self, _: &AttendanceSubmission) -> Result<()> {
            Ok(())
        }
        async fn submit_marks(&self, _: &MarksSubmission) -> Result<()> {
            Ok(())
        }
        async fn teacher_notifications(&self) -> Result<Vec<TeacherNotification>> {
            Ok(vec![])
        }
        async fn mark_notification_read(&self, _: &str) -> Result<()> {
            Ok(())
        }
        async fn classrooms(&self) -> Result<Vec<Classroom>> {
            Ok(vec![])
        }
        async fn room_requests(&self) -> Result<Vec<RoomRequest>> {
            Ok(vec![])
        }
        async fn create_room_request(&self, _: &NewRoomRequest) -> Result<RoomRequest> {
            Self::refuse()
        }
        async fn all_room_requests(&self) -> Result<Vec<RoomRequest>> {
            Ok(vec![])
        }
        async fn approve_room_request(&self, _: &str) -> Result<()> {
            Ok(())
        }
        async fn reject_room_request(&self, _: &str) -> Result<()> {
            Ok(())
        }
        async fn pending_courses(&self) -> Result<Vec<Course>> {
            Ok(vec![])
        }
        async fn approve_course(&self, _: &str) -> Result<()> {
            Ok(())
        }
        async fn reject_course(&self, _: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn failed_reads_serve_local_data() {
        let repo = FallbackRepository::new(Some(Offline::default()), LocalRepository::default());

        let notices = repo.student_notices().await.unwrap();
        assert_eq!(notices.len(), 5);
        assert_eq!(repo.pending_courses().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn successful_reads_win_over_local_data() {
        let repo = FallbackRepository::new(Some(Empty), LocalRepository::default());
        assert!(repo.student_notices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_writes_surface_and_leave_local_data_alone() {
        let local = LocalRepository::default();
        let repo = FallbackRepository::new(Some(Offline::default()), local.clone());

        let error = repo.approve_course("p1").await.unwrap_err();
        assert!(error.is_status(503));
        assert_eq!(local.pending_courses().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn demo_mode_writes_locally() {
        let local = LocalRepository::default();
        let repo = FallbackRepository::<Offline>::new(None, local.clone());
        assert!(repo.is_demo());

        repo.approve_course("p1").await.unwrap();
        assert_eq!(local.pending_courses().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn primary_is_asked_once_per_read() {
        let offline = Offline::default();
        let repo = FallbackRepository::new(Some(offline), LocalRepository::default());
        repo.teacher_notifications().await.unwrap();
        repo.approved_ods().await.unwrap();

        let calls = repo.primary.as_ref().map(|p| p.calls.get());
        assert_eq!(calls, Some(2));
    }
}
