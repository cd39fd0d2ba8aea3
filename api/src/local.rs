use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use types::{
    Result,
    attendance::{AttendanceSubmission, OdRecord, Student},
    classroom::{Classroom, NewRoomRequest, RoomRequest, has_approved_clash},
    course::{ApprovalStatus, ApprovedToday, Course, Enrollment, SlotOffering},
    err,
    marks::MarksSubmission,
    notification::{ReadStatus, TeacherNotification},
    student::{AttendanceConfirmation, Notice},
};
use uuid::Uuid;

use crate::{CampusRepository, MemoryStore, Store, seed};

/// Key the snapshot is saved under.
pub const SNAPSHOT_KEY: &str = "campus.local";

/// Everything the local store knows. Missing fields in an old snapshot are
/// filled from the placeholder data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalData {
    pub notices: Vec<Notice>,
    pub attendance_confirmations: Vec<AttendanceConfirmation>,
    pub slot_offerings: Vec<SlotOffering>,
    pub enrollments: Vec<Enrollment>,
    pub teacher_courses: Vec<Course>,
    pub rosters: BTreeMap<String, Vec<Student>>,
    pub ods: Vec<OdRecord>,
    pub notifications: Vec<TeacherNotification>,
    pub classrooms: Vec<Classroom>,
    pub room_requests: Vec<RoomRequest>,
    pub pending_courses: Vec<Course>,
    pub attendance_log: Vec<AttendanceSubmission>,
    pub marks_log: Vec<MarksSubmission>,
    pub approved_today: Option<ApprovedToday>,
}

impl Default for LocalData {
    fn default() -> Self {
        seed::placeholder()
    }
}

/// A [`CampusRepository`] over data held in the page and saved to a
/// [`Store`] after every write.
#[derive(Clone)]
pub struct LocalRepository {
    data: Rc<RefCell<LocalData>>,
    store: Rc<dyn Store>,
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new(LocalData::default(), Rc::new(MemoryStore::default()))
    }
}

impl LocalRepository {
    pub fn new(data: LocalData, store: Rc<dyn Store>) -> Self {
        Self {
            data: Rc::new(RefCell::new(data)),
            store,
        }
    }

    /// Rebuild from a saved snapshot. An unreadable snapshot is replaced by
    /// placeholder data rather than failing the app.
    pub fn restore(snapshot: Option<&str>, store: Rc<dyn Store>) -> Self {
        let data = match snapshot.map(serde_json::from_str::<LocalData>) {
            Some(Ok(data)) => data,
            Some(Err(error)) => {
                tracing::warn!(%error, "discarding unreadable local snapshot");
                LocalData::default()
            }
            None => LocalData::default(),
        };
        Self::new(data, store)
    }

    pub fn snapshot(&self) -> LocalData {
        self.data.borrow().clone()
    }

    fn read<T>(&self, f: impl FnOnce(&LocalData) -> T) -> T {
        f(&self.data.borrow())
    }

    /// Apply `f` and persist on success. Failed writes leave no trace.
    fn write<T>(&self, f: impl FnOnce(&mut LocalData) -> Result<T>) -> Result<T> {
        let value = {
            let mut data = self.data.borrow_mut();
            let mut draft = data.clone();
            let value = f(&mut draft)?;
            *data = draft;
            value
        };
        self.persist();
        Ok(value)
    }

    fn persist(&self) {
        match serde_json::to_string(&*self.data.borrow()) {
            Ok(json) => self.store.save(SNAPSHOT_KEY, json),
            Err(error) => tracing::error!(%error, "failed to serialize local snapshot"),
        }
    }

    /// Course approvals counted on `today`.
    pub fn approved_today(&self, today: Date) -> u32 {
        self.read(|d| d.approved_today.map_or(0, |a| a.count_on(today)))
    }

    pub fn record_approval(&self, today: Date) -> Result<u32> {
        self.write(|d| {
            let counter = d.approved_today.get_or_insert(ApprovedToday::new(today));
            counter.record(today);
            Ok(counter.count)
        })
    }

    fn decide_room_request(&self, id: &str, status: ApprovalStatus) -> Result<()> {
        self.write(|d| {
            let request = d
                .room_requests
                .iter()
                .find(|r| r.id == id)
                .ok_or_else(|| err!("room request {id} not found"))?;
            if !request.is_pending() {
                return Err(err!("room request {id} was already decided"));
            }
            if status == ApprovalStatus::Approved && has_approved_clash(request, &d.room_requests) {
                return Err(err!(
                    "{} is already allocated on {} for {}",
                    request.classroom_id,
                    request.request_date,
                    request.time_label()
                ));
            }

            if let Some(request) = d.room_requests.iter_mut().find(|r| r.id == id) {
                request.status = status;
            }
            Ok(())
        })
    }

    fn decide_course(&self, id: &str, status: ApprovalStatus) -> Result<()> {
        self.write(|d| {
            let idx = d
                .pending_courses
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| err!("course {id} is not awaiting approval"))?;
            let mut course = d.pending_courses.remove(idx);
            course.approval_status = status;

            if let Some(existing) = d.teacher_courses.iter_mut().find(|c| c.code == course.code) {
                existing.approval_status = status;
            } else if status == ApprovalStatus::Approved {
                d.teacher_courses.push(course);
            }
            Ok(())
        })
    }
}

impl CampusRepository for LocalRepository {
    async fn student_notices(&self) -> Result<Vec<Notice>> {
        Ok(self.read(|d| d.notices.clone()))
    }

    async fn attendance_confirmations(&self) -> Result<Vec<AttendanceConfirmation>> {
        Ok(self.read(|d| d.attendance_confirmations.clone()))
    }

    async fn slot_offerings(&self) -> Result<Vec<SlotOffering>> {
        Ok(self.read(|d| d.slot_offerings.clone()))
    }

    async fn enrollments(&self) -> Result<Vec<Enrollment>> {
        Ok(self.read(|d| d.enrollments.clone()))
    }

    async fn request_enrollment(&self, slot: &str, course_id: &str) -> Result<Enrollment> {
        self.write(|d| {
            let offered = d
                .slot_offerings
                .iter()
                .find(|o| o.slot == slot)
                .and_then(|o| o.courses.iter().find(|c| c.id == course_id))
                .ok_or_else(|| err!("course {course_id} is not offered in slot {slot}"))?;
            if offered.is_full() {
                return Err(err!("{} has no seats left", offered.code));
            }
            if d
                .enrollments
                .iter()
                .any(|e| e.slot == slot && e.status != ApprovalStatus::Rejected)
            {
                return Err(err!("slot {slot} already has an enrollment request"));
            }

            let enrollment = Enrollment {
                slot: slot.to_string(),
                course_id: course_id.to_string(),
                status: ApprovalStatus::Pending,
            };
            d.enrollments.retain(|e| e.slot != slot);
            d.enrollments.push(enrollment.clone());
            Ok(enrollment)
        })
    }

    async fn teacher_courses(&self) -> Result<Vec<Course>> {
        Ok(self.read(|d| d.teacher_courses.clone()))
    }

    async fn course_students(&self, course_id: &str) -> Result<Vec<Student>> {
        Ok(self.read(|d| d.rosters.get(course_id).cloned().unwrap_or_default()))
    }

    async fn approved_ods(&self) -> Result<Vec<OdRecord>> {
        Ok(self.read(|d| d.ods.clone()))
    }

    async fn submit_attendance(&self, submission: &AttendanceSubmission) -> Result<()> {
        self.write(|d| {
            d.attendance_log
                .retain(|s| !(s.course_id == submission.course_id && s.date == submission.date));
            d.attendance_log.push(submission.clone());
            Ok(())
        })
    }

    async fn submit_marks(&self, submission: &MarksSubmission) -> Result<()> {
        self.write(|d| {
            d.marks_log.push(submission.clone());
            Ok(())
        })
    }

    async fn teacher_notifications(&self) -> Result<Vec<TeacherNotification>> {
        Ok(self.read(|d| d.notifications.clone()))
    }

    async fn mark_notification_read(&self, id: &str) -> Result<()> {
        self.write(|d| {
            let notification = d
                .notifications
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| err!("notification {id} not found"))?;
            notification.status = ReadStatus::Read;
            Ok(())
        })
    }

    async fn room_requests(&self) -> Result<Vec<RoomRequest>> {
        Ok(self.read(|d| {
            d.room_requests
                .iter()
                .filter(|r| r.requested_by == seed::PROFILE_NAME)
                .cloned()
                .collect()
        }))
    }

    async fn classrooms(&self) -> Result<Vec<Classroom>> {
        Ok(self.read(|d| d.classrooms.clone()))
    }

    async fn create_room_request(&self, request: &NewRoomRequest) -> Result<RoomRequest> {
        if request.end_at <= request.start_at {
            return Err(err!("end time must be after the start time"));
        }

        self.write(|d| {
            let room = d
                .classrooms
                .iter()
                .find(|c| c.code == request.classroom_id)
                .ok_or_else(|| err!("classroom {} not found", request.classroom_id))?;
            if request.expected_students > room.capacity {
                return Err(err!(
                    "expected students ({}) exceed classroom capacity ({})",
                    request.expected_students,
                    room.capacity
                ));
            }

            let created = request
                .clone()
                .into_request(Uuid::new_v4().to_string(), seed::PROFILE_NAME);
            d.room_requests.push(created.clone());
            Ok(created)
        })
    }

    async fn all_room_requests(&self) -> Result<Vec<RoomRequest>> {
        Ok(self.read(|d| d.room_requests.clone()))
    }

    async fn approve_room_request(&self, id: &str) -> Result<()> {
        self.decide_room_request(id, ApprovalStatus::Approved)
    }

    async fn reject_room_request(&self, id: &str) -> Result<()> {
        self.decide_room_request(id, ApprovalStatus::Rejected)
    }

    async fn pending_courses(&self) -> Result<Vec<Course>> {
        Ok(self.read(|d| d.pending_courses.clone()))
    }

    async fn approve_course(&self, id: &str) -> Result<()> {
        self.decide_course(id, ApprovalStatus::Approved)
    }

    async fn reject_course(&self, id: &str) -> Result<()> {
        self.decide_course(id, ApprovalStatus::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use pretty_assertions::assert_eq;

    fn repo() -> (LocalRepository, Rc<MemoryStore>) {
        let store = Rc::new(MemoryStore::default());
        (LocalRepository::new(LocalData::default(), store.clone()), store)
    }

    #[tokio::test]
    async fn writes_are_persisted() {
        let (repo, store) = repo();
        assert!(store.get(SNAPSHOT_KEY).is_none());

        repo.mark_notification_read("t1").await.unwrap();

        let saved = store.get(SNAPSHOT_KEY).unwrap();
        let restored = LocalRepository::restore(Some(&saved), store.clone());
        let n = restored.teacher_notifications().await.unwrap();
        assert_eq!(n[0].status, ReadStatus::Read);
    }

    #[tokio::test]
    async fn failed_writes_change_nothing() {
        let (repo, store) = repo();
        let before = repo.snapshot();

        let error = repo.mark_notification_read("missing").await.unwrap_err();
        assert_eq!(error.message, "notification missing not found");
        assert_eq!(repo.snapshot(), before);
        assert!(store.get(SNAPSHOT_KEY).is_none());
    }

    #[tokio::test]
    async fn unreadable_snapshot_falls_back_to_placeholders() {
        let store = Rc::new(MemoryStore::default());
        let repo = LocalRepository::restore(Some("{not json"), store);
        assert_eq!(repo.student_notices().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn partial_snapshot_keeps_placeholder_defaults() {
        let store = Rc::new(MemoryStore::default());
        let repo = LocalRepository::restore(Some(r#"{"notices": []}"#), store);
        assert!(repo.student_notices().await.unwrap().is_empty());
        assert!(!repo.pending_courses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn course_decisions_leave_the_pending_queue() {
        let (repo, _) = repo();
        repo.approve_course("p2").await.unwrap();
        repo.reject_course("p3").await.unwrap();

        let pending = repo.pending_courses().await.unwrap();
        assert_eq!(pending.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), ["p1"]);

        let teacher = repo.teacher_courses().await.unwrap();
        assert!(
            teacher
                .iter()
                .any(|c| c.code == "EC201" && c.approval_status == ApprovalStatus::Approved)
        );
        assert!(!teacher.iter().any(|c| c.code == "ME110"));

        assert!(repo.approve_course("p2").await.is_err());
    }

    #[tokio::test]
    async fn approving_a_clashing_room_is_refused() {
        let (repo, _) = repo();
        repo.approve_room_request("r1").await.unwrap();

        let error = repo.approve_room_request("r3").await.unwrap_err();
        assert_eq!(
            error.message,
            "LH-1 is already allocated on 2026-01-22 for 11:00 - 12:00"
        );

        repo.reject_room_request("r3").await.unwrap();
        assert!(repo.reject_room_request("r3").await.is_err());
    }

    #[tokio::test]
    async fn created_room_requests_show_up_for_the_teacher() {
        let (repo, _) = repo();
        let mut body = NewRoomRequest {
            course_id: "CS103".into(),
            course_label: "CS103 - Algorithms (C)".into(),
            classroom_id: "Lab-1".into(),
            classroom_label: "Lab-1 - Systems Lab".into(),
            start_at: date(2026, 2, 2).at(9, 0, 0, 0),
            end_at: date(2026, 2, 2).at(10, 0, 0, 0),
            expected_students: 41,
            reason: "Quiz".into(),
        };
        let error = repo.create_room_request(&body).await.unwrap_err();
        assert_eq!(error.message, "expected students (41) exceed classroom capacity (40)");

        body.expected_students = 40;
        let created = repo.create_room_request(&body).await.unwrap();
        assert_eq!(created.status, ApprovalStatus::Pending);
        assert_eq!(created.time_label(), "09:00 - 10:00");

        let mine = repo.room_requests().await.unwrap();
        assert!(mine.iter().any(|r| r.id == created.id));
        assert!(!mine.iter().any(|r| r.requested_by != seed::PROFILE_NAME));
    }

    #[tokio::test]
    async fn enrollment_requests_lock_the_slot() {
        let (repo, _) = repo();
        let enrollment = repo.request_enrollment("B", "o-b2").await.unwrap();
        assert_eq!(enrollment.status, ApprovalStatus::Pending);

        assert!(repo.request_enrollment("B", "o-b1").await.is_err());
        assert!(repo.request_enrollment("A", "o-a2").await.is_err(), "full course");
        assert_eq!(repo.enrollments().await.unwrap(), vec![enrollment]);
    }

    #[tokio::test]
    async fn resubmitted_attendance_replaces_the_day() {
        let (repo, _) = repo();
        let submission = AttendanceSubmission {
            course_id: "CS101".into(),
            date: date(2026, 1, 15),
            entries: vec![],
        };
        repo.submit_attendance(&submission).await.unwrap();
        repo.submit_attendance(&submission).await.unwrap();
        assert_eq!(repo.snapshot().attendance_log.len(), 1);
    }

    #[test]
    fn approval_counter_is_per_day() {
        let (repo, _) = repo();
        assert_eq!(repo.record_approval(date(2026, 1, 15)).unwrap(), 1);
        assert_eq!(repo.record_approval(date(2026, 1, 15)).unwrap(), 2);
        assert_eq!(repo.approved_today(date(2026, 1, 15)), 2);
        assert_eq!(repo.approved_today(date(2026, 1, 16)), 0);
        assert_eq!(repo.record_approval(date(2026, 1, 16)).unwrap(), 1);
    }
}
