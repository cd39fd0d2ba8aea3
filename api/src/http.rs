use reqwest::{Client, Method, RequestBuilder, Response, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use types::{
    Error, Result,
    attendance::{AttendanceSubmission, OdRecord, Student},
    classroom::{Classroom, NewRoomRequest, RoomRequest},
    course::{ApprovalStatus, Course, Enrollment, SlotOffering},
    err,
    marks::MarksSubmission,
    notification::TeacherNotification,
    student::{AttendanceConfirmation, Notice},
};

use crate::CampusRepository;

trait ReqwestExt {
    async fn try_send<T: DeserializeOwned>(self) -> Result<T>;
    async fn try_send_empty(self) -> Result<()>;
}

impl ReqwestExt for RequestBuilder {
    async fn try_send<T: DeserializeOwned>(self) -> Result<T> {
        let response = checked(self).await?;
        let body = response.bytes().await.map_err(Error::transport)?;

        match serde_json::from_slice(&body) {
            Ok(r) => Ok(r),
            Err(error) => {
                tracing::debug!(?error, bytes = body.len(), "failed to parse response");
                Err(Error::body(error))
            }
        }
    }

    async fn try_send_empty(self) -> Result<()> {
        checked(self).await?;
        Ok(())
    }
}

async fn checked(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(Error::transport)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(%status, "backend rejected request");
    Err(Error::status(status.as_u16(), body))
}

/// A collection response. The backend names the array after the resource,
/// and a missing array means an empty collection.
#[derive(Deserialize)]
struct List<T> {
    #[serde(
        default = "Vec::new",
        alias = "courses",
        alias = "enrollments",
        alias = "notifications",
        alias = "ods",
        alias = "requests",
        alias = "slots"
    )]
    items: Vec<T>,
}

/// Some listings are a bare array instead.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Named(List<T>),
}

impl<T> ListBody<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) => items,
            ListBody::Named(list) => list.items,
        }
    }
}

/// Reply to a create call, `{"ok": true, "id": "42"}`.
#[derive(Deserialize)]
struct Created {
    id: String,
}

const ENROLLMENT_REQUESTS: [&str; 4] = ["api", "student", "enrollment", "requests"];
const ATTENDANCE_MARK: [&str; 4] = ["api", "teacher", "attendance", "mark"];

fn room_decision<'a>(id: &'a str, decision: &'a str) -> [&'a str; 5] {
    ["api", "admin", "classroom-requests", id, decision]
}

fn enrollment_body(slot: &str, course_id: &str) -> Value {
    json!({ "slot": slot, "courseId": course_id })
}

/// One day's attendance as per-student counts.
fn attendance_body(submission: &AttendanceSubmission) -> Value {
    let attendance: Vec<Value> = submission
        .entries
        .iter()
        .map(|entry| {
            let attended = u32::from(entry.status.counts_present());
            json!({
                "studentId": entry.reg_no,
                "regNo": entry.reg_no,
                "status": entry.status,
                "attended": attended,
                "total": 1,
                "percentage": attended * 100,
            })
        })
        .collect();

    json!({
        "courseId": submission.course_id,
        "date": submission.date,
        "attendance": attendance,
    })
}

/// Append `segments` to `base`, percent-encoding each one.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| err!("base url {base} cannot hold a path"))?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url)
}

#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl HttpRepository {
    pub fn new(base_url: Url, token: Option<SecretString>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            token,
        }
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    fn get(&self, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self.request(Method::GET, endpoint(&self.base_url, segments)?))
    }

    fn post(&self, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self.request(Method::POST, endpoint(&self.base_url, segments)?))
    }

    fn put(&self, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self.request(Method::PUT, endpoint(&self.base_url, segments)?))
    }

    async fn list<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Vec<T>> {
        Ok(self.get(segments)?.try_send::<ListBody<T>>().await?.into_items())
    }
}

impl CampusRepository for HttpRepository {
    async fn student_notices(&self) -> Result<Vec<Notice>> {
        self.list(&["api", "student", "notifications"]).await
    }

    async fn attendance_confirmations(&self) -> Result<Vec<AttendanceConfirmation>> {
        self.list(&["api", "student", "attendance-confirmations"])
            .await
    }

    async fn slot_offerings(&self) -> Result<Vec<SlotOffering>> {
        self.list(&["api", "student", "enrollment", "slots"]).await
    }

    async fn enrollments(&self) -> Result<Vec<Enrollment>> {
        self.list(&["api", "student", "enrollment"]).await
    }

    async fn request_enrollment(&self, slot: &str, course_id: &str) -> Result<Enrollment> {
        self.post(&ENROLLMENT_REQUESTS)?
            .json(&enrollment_body(slot, course_id))
            .try_send_empty()
            .await?;
        Ok(Enrollment {
            slot: slot.to_string(),
            course_id: course_id.to_string(),
            status: ApprovalStatus::Pending,
        })
    }

    async fn teacher_courses(&self) -> Result<Vec<Course>> {
        self.list(&["api", "teacher", "courses"]).await
    }

    async fn course_students(&self, course_id: &str) -> Result<Vec<Student>> {
        let mut url = endpoint(&self.base_url, &["api", "teacher", "enrollment", "approved"])?;
        url.query_pairs_mut().append_pair("course_id", course_id);

        Ok(self
            .request(Method::GET, url)
            .try_send::<ListBody<Student>>()
            .await?
            .into_items())
    }

    async fn approved_ods(&self) -> Result<Vec<OdRecord>> {
        self.list(&["api", "teacher", "od", "approved"]).await
    }

    async fn submit_attendance(&self, submission: &AttendanceSubmission) -> Result<()> {
        self.post(&ATTENDANCE_MARK)?
            .json(&attendance_body(submission))
            .try_send_empty()
            .await
    }

    async fn submit_marks(&self, submission: &MarksSubmission) -> Result<()> {
        self.post(&["api", "teacher", "marks", "declare-enter"])?
            .json(submission)
            .try_send_empty()
            .await
    }

    async fn teacher_notifications(&self) -> Result<Vec<TeacherNotification>> {
        self.list(&["api", "teacher", "notifications"]).await
    }

    async fn mark_notification_read(&self, id: &str) -> Result<()> {
        self.put(&["api", "teacher", "notifications", id, "read"])?
            .try_send_empty()
            .await
    }

    async fn classrooms(&self) -> Result<Vec<Classroom>> {
        self.list(&["api", "admin", "classrooms"]).await
    }

    async fn room_requests(&self) -> Result<Vec<RoomRequest>> {
        self.list(&["api", "teacher", "room-requests"]).await
    }

    async fn create_room_request(&self, request: &NewRoomRequest) -> Result<RoomRequest> {
        let created = self
            .post(&["api", "teacher", "room-requests"])?
            .json(request)
            .try_send::<Created>()
            .await?;
        // The backend fills in the requester from the token.
        Ok(request.clone().into_request(created.id, ""))
    }

    async fn all_room_requests(&self) -> Result<Vec<RoomRequest>> {
        self.list(&["api", "admin", "room-requests"]).await
    }

    async fn approve_room_request(&self, id: &str) -> Result<()> {
        self.post(&room_decision(id, "approve"))?
            .try_send_empty()
            .await
    }

    async fn reject_room_request(&self, id: &str) -> Result<()> {
        self.post(&room_decision(id, "reject"))?
            .try_send_empty()
            .await
    }

    async fn pending_courses(&self) -> Result<Vec<Course>> {
        self.list(&["api", "admin", "courses", "pending"]).await
    }

    async fn approve_course(&self, id: &str) -> Result<()> {
        self.post(&["api", "admin", "courses", id, "approve"])?
            .try_send_empty()
            .await
    }

    async fn reject_course(&self, id: &str) -> Result<()> {
        self.post(&["api", "admin", "courses", id, "reject"])?
            .try_send_empty()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use types::{attendance::AttendanceEntry, student::AttendanceStatus};

    fn base() -> Url {
        Url::parse("http://localhost/smart_campus_api/").unwrap()
    }

    #[test]
    fn endpoint_appends_under_base_path() {
        let url = endpoint(&base(), &["api", "admin", "courses", "pending"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost/smart_campus_api/api/admin/courses/pending"
        );

        let bare = Url::parse("https://campus.example").unwrap();
        let url = endpoint(&bare, &["api", "teacher", "courses"]).unwrap();
        assert_eq!(url.as_str(), "https://campus.example/api/teacher/courses");
    }

    #[test]
    fn ids_are_one_encoded_segment() {
        let url = endpoint(&base(), &["api", "admin", "courses", "a/b c", "approve"]).unwrap();
        assert_eq!(
            url.path(),
            "/smart_campus_api/api/admin/courses/a%2Fb%20c/approve"
        );
    }

    #[test]
    fn list_accepts_resource_named_arrays() {
        let json = r#"{"courses":[{
            "id": "1", "code": "CS101", "title": "Intro", "faculty": "Dr. Smith",
            "slot": "A", "seats": 60, "approval_status": "PENDING",
            "created_at": "2026-01-10"
        }]}"#;
        let list: List<Course> = serde_json::from_str(json).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].approval_status, ApprovalStatus::Pending);

        let empty: List<Course> = serde_json::from_str("{}").unwrap();
        assert!(empty.items.is_empty());
    }

    #[test]
    fn listings_may_be_bare_arrays() {
        let json = r#"[{"id":"1","code":"LH-1","name":"Lecture Hall 1","capacity":120}]"#;
        let rooms = serde_json::from_str::<ListBody<Classroom>>(json).unwrap().into_items();
        assert_eq!(rooms[0].capacity, 120);

        let json = r#"{"ok":true,"requests":[]}"#;
        let requests = serde_json::from_str::<ListBody<RoomRequest>>(json).unwrap().into_items();
        assert!(requests.is_empty());
    }

    #[test]
    fn write_routes() {
        let url = |segments: &[&str]| endpoint(&base(), segments).unwrap().path().to_string();
        assert_eq!(
            url(&ENROLLMENT_REQUESTS),
            "/smart_campus_api/api/student/enrollment/requests"
        );
        assert_eq!(url(&ATTENDANCE_MARK), "/smart_campus_api/api/teacher/attendance/mark");
        assert_eq!(
            url(&room_decision("7", "approve")),
            "/smart_campus_api/api/admin/classroom-requests/7/approve"
        );
    }

    #[test]
    fn enrollment_request_body_and_reply() {
        assert_eq!(
            enrollment_body("A", "o-a1"),
            json!({ "slot": "A", "courseId": "o-a1" })
        );
        let created: Created = serde_json::from_str(r#"{"ok":true,"id":"42"}"#).unwrap();
        assert_eq!(created.id, "42");
    }

    #[test]
    fn attendance_body_counts_each_student() {
        let submission = AttendanceSubmission {
            course_id: "CS101".into(),
            date: jiff::civil::date(2026, 1, 15),
            entries: vec![
                AttendanceEntry {
                    reg_no: "19221314".into(),
                    status: AttendanceStatus::Absent,
                },
                AttendanceEntry {
                    reg_no: "19231316".into(),
                    status: AttendanceStatus::OnDuty,
                },
            ],
        };

        assert_eq!(
            attendance_body(&submission),
            json!({
                "courseId": "CS101",
                "date": "2026-01-15",
                "attendance": [
                    {
                        "studentId": "19221314", "regNo": "19221314", "status": "Absent",
                        "attended": 0, "total": 1, "percentage": 0,
                    },
                    {
                        "studentId": "19231316", "regNo": "19231316", "status": "On Duty",
                        "attended": 1, "total": 1, "percentage": 100,
                    },
                ],
            })
        );
    }
}
