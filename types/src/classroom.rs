use jiff::civil::{Date, DateTime, Time};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    Keyed, Result,
    course::{ApprovalStatus, Course},
    err,
};

/// Columns the backend may send as `null`.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classroom {
    #[serde(alias = "room_code")]
    pub code: String,
    #[serde(alias = "room_name", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub capacity: u32,
}

impl Classroom {
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// A teacher's request for a classroom at a given time.
///
/// The teacher listing sends snake_case columns and the admin listing sends
/// camelCase, so both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    pub id: String,
    #[serde(alias = "course_id")]
    pub course_id: String,
    #[serde(alias = "course_label", default, deserialize_with = "null_as_empty")]
    pub course_label: String,
    #[serde(alias = "classroom_id")]
    pub classroom_id: String,
    #[serde(alias = "classroom_label", default, deserialize_with = "null_as_empty")]
    pub classroom_label: String,
    #[serde(alias = "request_date")]
    pub request_date: Date,
    #[serde(alias = "start_time")]
    pub start_time: Time,
    #[serde(alias = "end_time")]
    pub end_time: Time,
    #[serde(alias = "expected_students", default)]
    pub expected_students: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reason: String,
    #[serde(
        alias = "requesterRegNo",
        alias = "requester_reg_no",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub requested_by: String,
    pub status: ApprovalStatus,
}

impl RoomRequest {
    pub fn is_pending(&self) -> bool {
        self.status == ApprovalStatus::Pending
    }

    pub fn time_label(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.strftime("%H:%M"),
            self.end_time.strftime("%H:%M")
        )
    }

    /// Two requests clash when they ask for the same room on the same day at
    /// overlapping times. Back-to-back bookings do not clash.
    pub fn clashes_with(&self, other: &RoomRequest) -> bool {
        self.id != other.id
            && self.classroom_id == other.classroom_id
            && self.request_date == other.request_date
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }
}

impl Keyed for RoomRequest {
    fn key(&self) -> &str {
        &self.id
    }
}

/// The request form as the teacher fills it in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomRequestDraft {
    pub course_id: Option<String>,
    pub classroom_id: String,
    pub request_date: Option<Date>,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub expected_students: u32,
    pub reason: String,
}

impl RoomRequestDraft {
    pub fn new(today: Date) -> Self {
        Self {
            request_date: Some(today),
            ..Self::default()
        }
    }

    /// Check the form against the chosen course and room and build the body
    /// the backend expects.
    pub fn validate(&self, course: Option<&Course>, room: Option<&Classroom>) -> Result<NewRoomRequest> {
        let course = course.ok_or_else(|| err!("select a course"))?;
        let room = room.ok_or_else(|| err!("select a classroom"))?;
        let date = self.request_date.ok_or_else(|| err!("pick a date"))?;
        let start = self.start_time.ok_or_else(|| err!("select a start time"))?;
        let end = self.end_time.ok_or_else(|| err!("select an end time"))?;
        if end <= start {
            return Err(err!("end time must be after the start time"));
        }
        if self.expected_students == 0 {
            return Err(err!("enter the expected number of students"));
        }
        if self.expected_students > room.capacity {
            return Err(err!(
                "expected students ({}) exceed classroom capacity ({})",
                self.expected_students,
                room.capacity
            ));
        }
        let reason = self.reason.trim();
        if reason.is_empty() {
            return Err(err!("give a reason for the request"));
        }

        Ok(NewRoomRequest {
            course_id: course.code.clone(),
            course_label: format!("{} - {} ({})", course.code, course.title, course.slot),
            classroom_id: room.code.clone(),
            classroom_label: room.label(),
            start_at: date.to_datetime(start),
            end_at: date.to_datetime(end),
            expected_students: self.expected_students,
            reason: reason.to_string(),
        })
    }
}

/// Body of a room request as posted to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoomRequest {
    pub course_id: String,
    pub course_label: String,
    pub classroom_id: String,
    pub classroom_label: String,
    pub start_at: DateTime,
    pub end_at: DateTime,
    pub expected_students: u32,
    pub reason: String,
}

impl NewRoomRequest {
    /// The pending request this body creates once the backend assigns `id`.
    pub fn into_request(self, id: String, requested_by: &str) -> RoomRequest {
        RoomRequest {
            id,
            course_id: self.course_id,
            course_label: self.course_label,
            classroom_id: self.classroom_id,
            classroom_label: self.classroom_label,
            request_date: self.start_at.date(),
            start_time: self.start_at.time(),
            end_time: self.end_at.time(),
            expected_students: self.expected_students,
            reason: self.reason,
            requested_by: requested_by.to_string(),
            status: ApprovalStatus::Pending,
        }
    }
}

/// Whether `request` would double-book a room already approved for someone
/// else.
pub fn has_approved_clash(request: &RoomRequest, all: &[RoomRequest]) -> bool {
    all.iter()
        .any(|other| other.status == ApprovalStatus::Approved && request.clashes_with(other))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::{date, time};
    use pretty_assertions::assert_eq;

    fn request(id: &str, room: &str, from: Time, to: Time, status: ApprovalStatus) -> RoomRequest {
        RoomRequest {
            id: id.into(),
            course_id: "CS101".into(),
            course_label: "CS101 - Intro (A)".into(),
            classroom_id: room.into(),
            classroom_label: room.into(),
            request_date: date(2026, 2, 3),
            start_time: from,
            end_time: to,
            expected_students: 40,
            reason: String::new(),
            requested_by: "T1001".into(),
            status,
        }
    }

    fn course() -> Course {
        Course {
            id: "CS101".into(),
            code: "CS101".into(),
            title: "Intro".into(),
            faculty: "Dr. Smith".into(),
            slot: "A".into(),
            seats: 60,
            approval_status: ApprovalStatus::Approved,
            created_at: "2026-01-05".into(),
        }
    }

    fn lab() -> Classroom {
        Classroom {
            code: "Lab-1".into(),
            name: "Systems Lab".into(),
            capacity: 40,
        }
    }

    #[test]
    fn draft_checks_fields_in_form_order() {
        let mut draft = RoomRequestDraft::new(date(2026, 2, 3));
        let (course, room) = (course(), lab());

        let message = |d: &RoomRequestDraft, c, r| d.validate(c, r).unwrap_err().message;
        assert_eq!(message(&draft, None, Some(&room)), "select a course");
        assert_eq!(message(&draft, Some(&course), None), "select a classroom");
        assert_eq!(message(&draft, Some(&course), Some(&room)), "select a start time");

        draft.start_time = Some(time(10, 0, 0, 0));
        draft.end_time = Some(time(9, 0, 0, 0));
        assert_eq!(
            message(&draft, Some(&course), Some(&room)),
            "end time must be after the start time"
        );

        draft.end_time = Some(time(11, 30, 0, 0));
        assert_eq!(
            message(&draft, Some(&course), Some(&room)),
            "enter the expected number of students"
        );

        draft.expected_students = 41;
        assert_eq!(
            message(&draft, Some(&course), Some(&room)),
            "expected students (41) exceed classroom capacity (40)"
        );

        draft.expected_students = 40;
        draft.reason = "   ".into();
        assert_eq!(
            message(&draft, Some(&course), Some(&room)),
            "give a reason for the request"
        );
    }

    #[test]
    fn valid_draft_builds_the_backend_body() {
        let draft = RoomRequestDraft {
            course_id: Some("CS101".into()),
            classroom_id: "Lab-1".into(),
            request_date: Some(date(2026, 2, 3)),
            start_time: Some(time(10, 0, 0, 0)),
            end_time: Some(time(11, 30, 0, 0)),
            expected_students: 35,
            reason: " Extra lab ".into(),
        };
        let body = draft.validate(Some(&course()), Some(&lab())).unwrap();

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "courseId": "CS101",
                "courseLabel": "CS101 - Intro (A)",
                "classroomId": "Lab-1",
                "classroomLabel": "Lab-1 - Systems Lab",
                "startAt": "2026-02-03T10:00:00",
                "endAt": "2026-02-03T11:30:00",
                "expectedStudents": 35,
                "reason": "Extra lab",
            })
        );

        let created = body.into_request("42".into(), "T1001");
        assert_eq!(created.request_date, date(2026, 2, 3));
        assert_eq!(created.time_label(), "10:00 - 11:30");
        assert!(created.is_pending());
    }

    #[test]
    fn clash_needs_same_room_day_and_overlapping_times() {
        let ten = time(10, 0, 0, 0);
        let eleven = time(11, 0, 0, 0);
        let noon = time(12, 0, 0, 0);
        let pending = request("1", "LH-1", ten, noon, ApprovalStatus::Pending);
        let approved = request("2", "LH-1", eleven, noon, ApprovalStatus::Approved);
        let elsewhere = request("3", "LH-2", ten, noon, ApprovalStatus::Approved);
        let before = request("4", "LH-1", time(8, 0, 0, 0), ten, ApprovalStatus::Approved);

        assert!(has_approved_clash(&pending, &[approved.clone(), elsewhere.clone()]));
        assert!(!has_approved_clash(&pending, &[elsewhere, before]));
        assert!(!has_approved_clash(&approved, &[approved.clone()]));
    }

    #[test]
    fn accepts_both_backend_listings() {
        let teacher: RoomRequest = serde_json::from_str(
            r#"{
                "id": "7", "course_id": "CS101", "course_label": "CS101 - Intro (A)",
                "classroom_id": "LH-1", "classroom_label": null,
                "request_date": "2026-02-03", "start_time": "10:00:00", "end_time": "11:00:00",
                "expected_students": 50, "reason": "Guest lecture", "status": "PENDING"
            }"#,
        )
        .unwrap();
        assert_eq!(teacher.classroom_label, "");
        assert_eq!(teacher.start_time, time(10, 0, 0, 0));

        let admin: RoomRequest = serde_json::from_str(
            r#"{
                "id": "7", "requesterRegNo": "T1001", "courseId": "CS101",
                "courseLabel": "CS101 - Intro (A)", "classroomId": "LH-1",
                "classroomLabel": "LH-1 - Lecture Hall 1", "requestDate": "2026-02-03",
                "startTime": "10:00:00", "endTime": "11:00:00", "expectedStudents": 50,
                "reason": "Guest lecture", "status": "APPROVED"
            }"#,
        )
        .unwrap();
        assert_eq!(admin.requested_by, "T1001");
        assert!(teacher.clashes_with(&RoomRequest {
            id: "8".into(),
            ..admin
        }));
    }
}
