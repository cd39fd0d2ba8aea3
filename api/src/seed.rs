//! Placeholder records served until a backend exists.

use std::collections::BTreeMap;

use jiff::{
    Timestamp,
    civil::{Date, date, time},
};
use types::{
    attendance::{OdRecord, OdStatus, Student},
    classroom::{Classroom, RoomRequest},
    course::{ApprovalStatus, Course, OfferedCourse, SlotOffering},
    notification::{NotificationKind, Priority, ReadStatus, TeacherNotification},
    student::{AttendanceConfirmation, AttendanceStatus, Notice},
};

use crate::LocalData;

pub(crate) const PROFILE_NAME: &str = "Dr. John Smith";

pub(crate) fn placeholder() -> LocalData {
    LocalData {
        notices: notices(),
        attendance_confirmations: attendance_confirmations(),
        slot_offerings: slot_offerings(),
        enrollments: Vec::new(),
        teacher_courses: teacher_courses(),
        rosters: rosters(),
        ods: ods(),
        notifications: notifications(),
        classrooms: classrooms(),
        room_requests: room_requests(),
        pending_courses: pending_courses(),
        attendance_log: Vec::new(),
        marks_log: Vec::new(),
        approved_today: None,
    }
}

fn notice(id: &str, by: &str, date_label: &str, body: &str, download: bool) -> Notice {
    Notice {
        id: id.into(),
        by: by.into(),
        date_label: date_label.into(),
        body: body.into(),
        has_download: download,
        download_url: download.then(|| "#".to_string()),
    }
}

fn notices() -> Vec<Notice> {
    vec![
        notice(
            "1",
            "Finance Office",
            "15/01/2026",
            "Fee payment reminder: Your tuition fee installment is due by 20th January. \
             Please complete the payment to avoid late fees.",
            false,
        ),
        notice(
            "2",
            "Academic Section",
            "12/01/2026",
            "Internal assessment schedule updated. Check your student portal for the \
             revised dates for Level 1 and Level 2 assessments.",
            true,
        ),
        notice(
            "3",
            "Hostel Administration",
            "10/01/2026",
            "Hostel maintenance work scheduled for 18th January. Rooms will be \
             inaccessible from 10 AM to 4 PM.",
            false,
        ),
        notice(
            "4",
            "Placement Cell",
            "08/01/2026",
            "New placement drive announcement: TechCorp is visiting campus for \
             recruitment. Register by 15th January through the placement portal.",
            true,
        ),
        notice(
            "5",
            "Library",
            "05/01/2026",
            "Book return reminder: You have 2 overdue books. Please return them by \
             12th January to avoid fines.",
            false,
        ),
    ]
}

fn attendance_confirmations() -> Vec<AttendanceConfirmation> {
    [
        ("1", "CS101", "Introduction to Computer Science", "15/01/2026", AttendanceStatus::Present),
        ("2", "CS102", "Data Structures", "15/01/2026", AttendanceStatus::Present),
        ("3", "CS103", "Algorithms", "14/01/2026", AttendanceStatus::OnDuty),
    ]
    .into_iter()
    .map(|(id, code, name, day, status)| AttendanceConfirmation {
        id: id.into(),
        course_code: code.into(),
        course_name: name.into(),
        date: day.into(),
        status,
        marked_by: PROFILE_NAME.into(),
    })
    .collect()
}

fn offered(id: &str, code: &str, title: &str, faculty: &str, seats: u32, registered: u32) -> OfferedCourse {
    OfferedCourse {
        id: id.into(),
        code: code.into(),
        title: title.into(),
        faculty: faculty.into(),
        seats,
        registered,
    }
}

fn slot_offerings() -> Vec<SlotOffering> {
    vec![
        SlotOffering {
            slot: "A".into(),
            courses: vec![
                offered("o-a1", "CS101", "Introduction to Computer Science", PROFILE_NAME, 60, 42),
                offered("o-a2", "MA101", "Engineering Mathematics", "Dr. Priya Raman", 60, 60),
            ],
        },
        SlotOffering {
            slot: "B".into(),
            courses: vec![
                offered("o-b1", "CS102", "Data Structures", PROFILE_NAME, 50, 31),
                offered("o-b2", "PH101", "Engineering Physics", "Dr. Arjun Mehta", 45, 12),
            ],
        },
        SlotOffering {
            slot: "C".into(),
            courses: vec![
                offered("o-c1", "CS103", "Algorithms", PROFILE_NAME, 40, 18),
                offered("o-c2", "HS101", "Professional Communication", "Ms. Kavya Iyer", 70, 55),
            ],
        },
    ]
}

fn course(id: &str, code: &str, title: &str, faculty: &str, slot: &str, status: ApprovalStatus) -> Course {
    Course {
        id: id.into(),
        code: code.into(),
        title: title.into(),
        faculty: faculty.into(),
        slot: slot.into(),
        seats: 60,
        approval_status: status,
        created_at: "2026-01-05".into(),
    }
}

fn teacher_courses() -> Vec<Course> {
    vec![
        course("CS101", "CS101", "Introduction to Computer Science", PROFILE_NAME, "A", ApprovalStatus::Approved),
        course("CS102", "CS102", "Data Structures", PROFILE_NAME, "B", ApprovalStatus::Approved),
        course("CS103", "CS103", "Algorithms", PROFILE_NAME, "C", ApprovalStatus::Approved),
        course("CS104", "CS104", "Operating Systems", PROFILE_NAME, "D", ApprovalStatus::Pending),
    ]
}

fn pending_courses() -> Vec<Course> {
    vec![
        course("p1", "CS104", "Operating Systems", PROFILE_NAME, "D", ApprovalStatus::Pending),
        course("p2", "EC201", "Digital Electronics", "Dr. Meera Nair", "E", ApprovalStatus::Pending),
        course("p3", "ME110", "Engineering Graphics", "Dr. Suresh Kumar", "F", ApprovalStatus::Pending),
    ]
}

fn rosters() -> BTreeMap<String, Vec<Student>> {
    let students: Vec<Student> = [
        ("19221314", "Alice Johnson"),
        ("19221315", "Bob Smith"),
        ("19231316", "Charlie Brown"),
        ("19221317", "Diana Prince"),
        ("19231318", "Eve Wilson"),
    ]
    .into_iter()
    .map(|(reg_no, name)| Student {
        reg_no: reg_no.into(),
        name: name.into(),
    })
    .collect();

    ["CS101", "CS102", "CS103"]
        .into_iter()
        .map(|course| (course.to_string(), students.clone()))
        .collect()
}

fn ods() -> Vec<OdRecord> {
    vec![OdRecord {
        reg_no: "19231316".into(),
        status: OdStatus::Approved,
        start_date: date(2026, 1, 14),
        end_date: date(2026, 1, 16),
    }]
}

fn notifications() -> Vec<TeacherNotification> {
    let at = |s: &str| s.parse::<Timestamp>().unwrap_or(Timestamp::UNIX_EPOCH);
    vec![
        TeacherNotification {
            id: "t1".into(),
            title: "Internal assessment window".into(),
            message: "Level 1 marks must be entered before 24th January.".into(),
            kind: NotificationKind::Academic,
            status: ReadStatus::Unread,
            priority: Priority::High,
            timestamp: at("2026-01-15T09:00:00Z"),
            sender: "Controller of Examinations".into(),
        },
        TeacherNotification {
            id: "t2".into(),
            title: "Faculty meeting".into(),
            message: "Department meeting on Friday at 3 PM in the seminar hall.".into(),
            kind: NotificationKind::Administrative,
            status: ReadStatus::Unread,
            priority: Priority::Medium,
            timestamp: at("2026-01-14T11:30:00Z"),
            sender: "HOD Office".into(),
        },
        TeacherNotification {
            id: "t3".into(),
            title: "OD request approved".into(),
            message: "Charlie Brown (19231316) is on duty from 14/01 to 16/01.".into(),
            kind: NotificationKind::Student,
            status: ReadStatus::Read,
            priority: Priority::Low,
            timestamp: at("2026-01-13T08:15:00Z"),
            sender: "Student Affairs".into(),
        },
        TeacherNotification {
            id: "t4".into(),
            title: "Portal maintenance".into(),
            message: "The campus portal will be offline Sunday 2 AM to 4 AM.".into(),
            kind: NotificationKind::System,
            status: ReadStatus::Read,
            priority: Priority::Medium,
            timestamp: at("2026-01-10T16:00:00Z"),
            sender: "IT Services".into(),
        },
        TeacherNotification {
            id: "t5".into(),
            title: "Projector replacement".into(),
            message: "Projectors in LH-2 and LH-3 are being replaced this week.".into(),
            kind: NotificationKind::Maintenance,
            status: ReadStatus::Unread,
            priority: Priority::Low,
            timestamp: at("2026-01-08T10:00:00Z"),
            sender: "Estate Office".into(),
        },
    ]
}

fn classrooms() -> Vec<Classroom> {
    [
        ("LH-1", "Lecture Hall 1", 120),
        ("LH-2", "Lecture Hall 2", 120),
        ("LH-3", "Lecture Hall 3", 80),
        ("Lab-1", "Systems Lab", 40),
        ("Lab-2", "Networks Lab", 40),
        ("Lab-3", "Electronics Lab", 60),
    ]
    .into_iter()
    .map(|(code, name, capacity)| Classroom {
        code: code.into(),
        name: name.into(),
        capacity,
    })
    .collect()
}

#[allow(clippy::too_many_arguments)]
fn room_request(
    id: &str,
    course: &str,
    room: &str,
    day: Date,
    from: (i8, i8),
    to: (i8, i8),
    expected_students: u32,
    reason: &str,
    requested_by: &str,
    status: ApprovalStatus,
) -> RoomRequest {
    RoomRequest {
        id: id.into(),
        course_id: course.into(),
        course_label: course.into(),
        classroom_id: room.into(),
        classroom_label: room.into(),
        request_date: day,
        start_time: time(from.0, from.1, 0, 0),
        end_time: time(to.0, to.1, 0, 0),
        expected_students,
        reason: reason.into(),
        requested_by: requested_by.into(),
        status,
    }
}

fn room_requests() -> Vec<RoomRequest> {
    let day = date(2026, 1, 22);
    vec![
        room_request(
            "r1", "CS101", "LH-1", day, (10, 0), (11, 30), 90, "Guest lecture",
            PROFILE_NAME, ApprovalStatus::Pending,
        ),
        room_request(
            "r2", "CS102", "Lab-3", date(2026, 1, 23), (14, 0), (16, 0), 45, "Lab session",
            PROFILE_NAME, ApprovalStatus::Approved,
        ),
        room_request(
            "r3", "EC201", "LH-1", day, (11, 0), (12, 0), 70, "Make-up class",
            "Dr. Meera Nair", ApprovalStatus::Pending,
        ),
    ]
}
