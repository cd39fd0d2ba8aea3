use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{Keyed, Result, err, matches_query};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Pending => "badge badge-pending",
            Self::Approved => "badge badge-approved",
            Self::Rejected => "badge badge-rejected",
        }
    }
}

/// A course as submitted by faculty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub title: String,
    pub faculty: String,
    pub slot: String,
    pub seats: u32,
    pub approval_status: ApprovalStatus,
    pub created_at: String,
}

impl Course {
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.title)
    }

    pub fn matches(&self, query: &str) -> bool {
        matches_query(
            query,
            &[
                &self.code,
                &self.title,
                &self.faculty,
                &self.slot,
                self.approval_status.label(),
            ],
        )
    }
}

impl Keyed for Course {
    fn key(&self) -> &str {
        &self.id
    }
}

/// A course offered for enrollment within a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferedCourse {
    pub id: String,
    pub code: String,
    pub title: String,
    pub faculty: String,
    pub seats: u32,
    pub registered: u32,
}

impl OfferedCourse {
    pub fn available_seats(&self) -> u32 {
        self.seats.saturating_sub(self.registered)
    }

    pub fn is_full(&self) -> bool {
        self.available_seats() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotOffering {
    pub slot: String,
    pub courses: Vec<OfferedCourse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub slot: String,
    pub course_id: String,
    pub status: ApprovalStatus,
}

impl Keyed for Enrollment {
    fn key(&self) -> &str {
        &self.slot
    }
}

/// Student-side enrollment state: what was offered, what was decided, and
/// the not yet submitted picks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrollmentBoard {
    offerings: Vec<SlotOffering>,
    decisions: BTreeMap<String, Enrollment>,
    picks: BTreeMap<String, String>,
}

impl EnrollmentBoard {
    pub fn new(offerings: Vec<SlotOffering>, enrollments: Vec<Enrollment>) -> Self {
        Self {
            offerings,
            decisions: enrollments
                .into_iter()
                .map(|e| (e.slot.clone(), e))
                .collect(),
            picks: BTreeMap::new(),
        }
    }

    pub fn offerings(&self) -> &[SlotOffering] {
        &self.offerings
    }

    pub fn decision(&self, slot: &str) -> Option<&Enrollment> {
        self.decisions.get(slot)
    }

    pub fn pick(&self, slot: &str) -> Option<&str> {
        self.picks.get(slot).map(String::as_str)
    }

    /// A slot is locked once a request is pending or approved. Rejected
    /// requests may be retried.
    pub fn is_locked(&self, slot: &str) -> bool {
        self.decision(slot)
            .is_some_and(|e| e.status != ApprovalStatus::Rejected)
    }

    /// Status of `course_id` in `slot`, if the student has a request for it.
    pub fn status_of(&self, slot: &str, course_id: &str) -> Option<ApprovalStatus> {
        self.decision(slot)
            .filter(|e| e.course_id == course_id)
            .map(|e| e.status)
    }

    pub fn select(&mut self, slot: &str, course_id: &str) -> Result<()> {
        if self.is_locked(slot) {
            return Err(err!("slot {slot} already has an enrollment request"));
        }

        let course = self
            .offerings
            .iter()
            .find(|o| o.slot == slot)
            .and_then(|o| o.courses.iter().find(|c| c.id == course_id))
            .ok_or_else(|| err!("course {course_id} is not offered in slot {slot}"))?;

        if course.is_full() {
            return Err(err!("{} has no seats left", course.code));
        }

        self.picks.insert(slot.to_string(), course_id.to_string());
        Ok(())
    }

    pub fn clear_pick(&mut self, slot: &str) {
        self.picks.remove(slot);
    }

    /// Picks ready for submission, in slot order.
    pub fn picks(&self) -> impl Iterator<Item = (&str, &str)> {
        self.picks.iter().map(|(s, c)| (s.as_str(), c.as_str()))
    }

    /// Record the backend's answer to a request. The pick becomes a decision.
    pub fn record(&mut self, enrollment: Enrollment) {
        self.picks.remove(&enrollment.slot);
        self.decisions.insert(enrollment.slot.clone(), enrollment);
    }
}

/// Count of course approvals on the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedToday {
    pub date: Date,
    pub count: u32,
}

impl ApprovedToday {
    pub fn new(today: Date) -> Self {
        Self {
            date: today,
            count: 0,
        }
    }

    pub fn count_on(&self, today: Date) -> u32 {
        if self.date == today { self.count } else { 0 }
    }

    pub fn record(&mut self, today: Date) {
        if self.date != today {
            *self = Self::new(today);
        }
        self.count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use pretty_assertions::assert_eq;

    fn offering() -> SlotOffering {
        SlotOffering {
            slot: "A".into(),
            courses: vec![
                OfferedCourse {
                    id: "c1".into(),
                    code: "CS101".into(),
                    title: "Intro".into(),
                    faculty: "Dr. Smith".into(),
                    seats: 60,
                    registered: 12,
                },
                OfferedCourse {
                    id: "c2".into(),
                    code: "CS102".into(),
                    title: "Data Structures".into(),
                    faculty: "Dr. Rao".into(),
                    seats: 40,
                    registered: 40,
                },
            ],
        }
    }

    #[test]
    fn course_search_covers_status() {
        let course = Course {
            id: "1".into(),
            code: "MA201".into(),
            title: "Linear Algebra".into(),
            faculty: "Dr. Noether".into(),
            slot: "B".into(),
            seats: 50,
            approval_status: ApprovalStatus::Pending,
            created_at: "2026-01-10".into(),
        };
        assert!(course.matches("pending"));
        assert!(course.matches("noether"));
        assert!(!course.matches("physics"));
        assert_eq!(course.label(), "MA201 - Linear Algebra");
    }

    #[test]
    fn approval_status_wire_format() {
        let json = serde_json::to_string(&ApprovalStatus::Approved).unwrap();
        assert_eq!(json, "\"APPROVED\"");
    }

    #[test]
    fn full_courses_cannot_be_picked() {
        let mut board = EnrollmentBoard::new(vec![offering()], vec![]);
        assert!(board.select("A", "c2").is_err());
        board.select("A", "c1").unwrap();
        assert_eq!(board.pick("A"), Some("c1"));
    }

    #[test]
    fn pending_slots_are_locked_but_rejections_can_retry() {
        let pending = Enrollment {
            slot: "A".into(),
            course_id: "c1".into(),
            status: ApprovalStatus::Pending,
        };
        let mut board = EnrollmentBoard::new(vec![offering()], vec![pending]);
        assert!(board.is_locked("A"));
        assert!(board.select("A", "c1").is_err());
        assert_eq!(board.status_of("A", "c1"), Some(ApprovalStatus::Pending));
        assert_eq!(board.status_of("A", "c2"), None);

        board.record(Enrollment {
            slot: "A".into(),
            course_id: "c1".into(),
            status: ApprovalStatus::Rejected,
        });
        assert!(!board.is_locked("A"));
        board.select("A", "c1").unwrap();
    }

    #[test]
    fn recording_a_request_consumes_the_pick() {
        let mut board = EnrollmentBoard::new(vec![offering()], vec![]);
        board.select("A", "c1").unwrap();
        board.record(Enrollment {
            slot: "A".into(),
            course_id: "c1".into(),
            status: ApprovalStatus::Pending,
        });
        assert_eq!(board.picks().count(), 0);
        assert!(board.is_locked("A"));
    }

    #[test]
    fn approved_today_resets_on_a_new_day() {
        let mut counter = ApprovedToday::new(date(2026, 3, 9));
        counter.record(date(2026, 3, 9));
        counter.record(date(2026, 3, 9));
        assert_eq!(counter.count_on(date(2026, 3, 9)), 2);
        assert_eq!(counter.count_on(date(2026, 3, 10)), 0);

        counter.record(date(2026, 3, 10));
        assert_eq!(counter, ApprovedToday { date: date(2026, 3, 10), count: 1 });
    }
}
