use std::collections::{HashMap, HashSet};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::student::AttendanceStatus;

/// A student on a course roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(alias = "reg_no")]
    pub reg_no: String,
    #[serde(alias = "studentName", alias = "student_name")]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OdStatus {
    Pending,
    Approved,
    Rejected,
}

/// An On Duty leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OdRecord {
    pub reg_no: String,
    pub status: OdStatus,
    pub start_date: Date,
    pub end_date: Date,
}

impl OdRecord {
    /// Whether this leave is approved and `day` falls inside it, both ends
    /// inclusive.
    pub fn covers(&self, day: Date) -> bool {
        self.status == OdStatus::Approved && self.start_date <= day && day <= self.end_date
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceTotals {
    pub present: usize,
    pub absent: usize,
    pub on_duty: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub reg_no: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSubmission {
    pub course_id: String,
    pub date: Date,
    pub entries: Vec<AttendanceEntry>,
}

/// Attendance being marked for one course on one day.
///
/// Everybody starts present. Students with an approved OD covering the day
/// are forced present: toggling them is refused and "mark all absent" skips
/// them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceSheet {
    students: Vec<Student>,
    present: HashMap<String, bool>,
    on_duty: HashSet<String>,
}

impl AttendanceSheet {
    pub fn new(students: Vec<Student>, ods: &[OdRecord], day: Date) -> Self {
        let on_duty = students
            .iter()
            .filter(|s| ods.iter().any(|od| od.reg_no == s.reg_no && od.covers(day)))
            .map(|s| s.reg_no.clone())
            .collect();
        let present = students.iter().map(|s| (s.reg_no.clone(), true)).collect();

        Self {
            students,
            present,
            on_duty,
        }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn is_on_duty(&self, reg_no: &str) -> bool {
        self.on_duty.contains(reg_no)
    }

    pub fn is_present(&self, reg_no: &str) -> bool {
        self.is_on_duty(reg_no) || self.present.get(reg_no).copied().unwrap_or(false)
    }

    pub fn status(&self, reg_no: &str) -> AttendanceStatus {
        if self.is_on_duty(reg_no) {
            AttendanceStatus::OnDuty
        } else if self.is_present(reg_no) {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Absent
        }
    }

    /// Flip one student. Returns `false` when the student is on duty or not
    /// on the roster.
    pub fn toggle(&mut self, reg_no: &str) -> bool {
        if self.is_on_duty(reg_no) {
            return false;
        }
        match self.present.get_mut(reg_no) {
            Some(present) => {
                *present = !*present;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_present(&mut self) {
        self.present.values_mut().for_each(|p| *p = true);
    }

    pub fn mark_all_absent(&mut self) {
        for (reg_no, present) in self.present.iter_mut() {
            *present = self.on_duty.contains(reg_no);
        }
    }

    pub fn totals(&self) -> AttendanceTotals {
        let mut totals = AttendanceTotals {
            total: self.students.len(),
            ..Default::default()
        };
        for student in &self.students {
            match self.status(&student.reg_no) {
                AttendanceStatus::OnDuty => {
                    totals.on_duty += 1;
                    totals.present += 1;
                }
                AttendanceStatus::Present => totals.present += 1,
                AttendanceStatus::Absent => totals.absent += 1,
            }
        }
        totals
    }

    pub fn submission(&self, course_id: &str, date: Date) -> AttendanceSubmission {
        AttendanceSubmission {
            course_id: course_id.to_string(),
            date,
            entries: self
                .students
                .iter()
                .map(|s| AttendanceEntry {
                    reg_no: s.reg_no.clone(),
                    status: self.status(&s.reg_no),
                })
                .collect(),
        }
    }
}
