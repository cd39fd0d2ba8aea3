use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attendance::Student;

/// Whether `input` is acceptable while the teacher is still typing: empty,
/// or digits with at most two decimals.
pub fn is_mark_shape(input: &str) -> bool {
    if input.is_empty() {
        return true;
    }
    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (input, None),
    };
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    !whole.is_empty()
        && digits(whole)
        && fraction.is_none_or(|f| f.len() <= 2 && digits(f))
}

/// Parse a final mark percentage in 0..=100.
pub fn parse_mark(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() || !is_mark_shape(input) {
        return None;
    }
    input
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && (0.0..=100.0).contains(n))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkLine {
    pub s_no: usize,
    pub reg_no: String,
    pub name: String,
    pub mark_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksSubmission {
    pub course_id: String,
    pub test_name: String,
    pub competency: String,
    pub marks: Vec<MarkLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarksError {
    MissingTestName,
    MissingCourse,
    EmptyMark { reg_no: String },
    InvalidMark { reg_no: String },
}

impl MarksError {
    /// The student whose input needs attention, if any.
    pub fn reg_no(&self) -> Option<&str> {
        match self {
            Self::EmptyMark { reg_no } | Self::InvalidMark { reg_no } => Some(reg_no),
            _ => None,
        }
    }
}

impl std::fmt::Display for MarksError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTestName => write!(f, "Please enter Name of the Test."),
            Self::MissingCourse => write!(f, "Please select Course."),
            Self::EmptyMark { .. } => write!(
                f,
                "Please fill the mark % without empty. Enter Zero if absent."
            ),
            Self::InvalidMark { .. } => write!(
                f,
                "Please enter marks in % (only decimal or integer values, 0 to 100)."
            ),
        }
    }
}

impl std::error::Error for MarksError {}

/// Internal marks being entered for one test of one course.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarksSheet {
    pub test_name: String,
    pub competency: String,
    pub course_id: Option<String>,
    students: Vec<Student>,
    marks: HashMap<String, String>,
}

impl MarksSheet {
    /// Switch to a new roster. Previous inputs are dropped.
    pub fn set_roster(&mut self, students: Vec<Student>) {
        self.marks = students
            .iter()
            .map(|s| (s.reg_no.clone(), String::new()))
            .collect();
        self.students = students;
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn mark(&self, reg_no: &str) -> &str {
        self.marks.get(reg_no).map(String::as_str).unwrap_or("")
    }

    /// Store typed input. Returns `false`, leaving the previous value, when the
    /// input is not mark-shaped.
    pub fn set_mark(&mut self, reg_no: &str, input: &str) -> bool {
        if !is_mark_shape(input) {
            return false;
        }
        match self.marks.get_mut(reg_no) {
            Some(mark) => {
                *mark = input.to_string();
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<MarksSubmission, MarksError> {
        let test_name = self.test_name.trim();
        if test_name.is_empty() {
            return Err(MarksError::MissingTestName);
        }
        let course_id = self
            .course_id
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(MarksError::MissingCourse)?;

        let mut marks = Vec::with_capacity(self.students.len());
        for (idx, student) in self.students.iter().enumerate() {
            let input = self.mark(&student.reg_no).trim();
            if input.is_empty() {
                return Err(MarksError::EmptyMark {
                    reg_no: student.reg_no.clone(),
                });
            }
            let mark_percent = parse_mark(input).ok_or_else(|| MarksError::InvalidMark {
                reg_no: student.reg_no.clone(),
            })?;
            marks.push(MarkLine {
                s_no: idx + 1,
                reg_no: student.reg_no.clone(),
                name: student.name.clone(),
                mark_percent,
            });
        }

        Ok(MarksSubmission {
            course_id: course_id.to_string(),
            test_name: test_name.to_string(),
            competency: self.competency.trim().to_string(),
            marks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sheet() -> MarksSheet {
        let mut sheet = MarksSheet {
            test_name: " Level 1 ".into(),
            course_id: Some("7".into()),
            ..Default::default()
        };
        sheet.set_roster(vec![
            Student {
                reg_no: "1".into(),
                name: "Alice".into(),
            },
            Student {
                reg_no: "2".into(),
                name: "Bob".into(),
            },
        ]);
        sheet
    }

    #[test]
    fn typing_guard() {
        assert!(is_mark_shape(""));
        assert!(is_mark_shape("87"));
        assert!(is_mark_shape("87."));
        assert!(is_mark_shape("87.25"));
        assert!(!is_mark_shape("87.255"));
        assert!(!is_mark_shape("-3"));
        assert!(!is_mark_shape(".5"));
        assert!(!is_mark_shape("8a"));
    }

    #[test]
    fn final_marks_are_bounded() {
        assert_eq!(parse_mark("100"), Some(100.0));
        assert_eq!(parse_mark("0"), Some(0.0));
        assert_eq!(parse_mark("100.01"), None);
        assert_eq!(parse_mark(""), None);
    }

    #[test]
    fn rejected_input_keeps_previous_value() {
        let mut sheet = sheet();
        assert!(sheet.set_mark("1", "45.5"));
        assert!(!sheet.set_mark("1", "45.5x"));
        assert_eq!(sheet.mark("1"), "45.5");
    }

    #[test]
    fn validation_reports_first_problem() {
        let mut sheet = sheet();
        sheet.set_mark("1", "45");
        assert_eq!(
            sheet.validate(),
            Err(MarksError::EmptyMark {
                reg_no: "2".into()
            })
        );

        sheet.set_mark("2", "140");
        let error = sheet.validate().unwrap_err();
        assert_eq!(error.reg_no(), Some("2"));
        assert!(matches!(error, MarksError::InvalidMark { .. }));

        sheet.course_id = None;
        assert_eq!(sheet.validate(), Err(MarksError::MissingCourse));
        sheet.test_name.clear();
        assert_eq!(sheet.validate(), Err(MarksError::MissingTestName));
    }

    #[test]
    fn valid_sheet_builds_numbered_submission() {
        let mut sheet = sheet();
        sheet.set_mark("1", "45");
        sheet.set_mark("2", "99.5");

        let submission = sheet.validate().unwrap();
        assert_eq!(submission.test_name, "Level 1");
        assert_eq!(submission.marks[1].s_no, 2);
        assert_eq!(submission.marks[1].mark_percent, 99.5);
    }
}
