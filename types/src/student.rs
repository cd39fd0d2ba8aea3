use serde::{Deserialize, Serialize};

use crate::Keyed;

/// A notice shown on the student dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub by: String,
    pub date_label: String,
    pub body: String,
    #[serde(default)]
    pub has_download: bool,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl Notice {
    /// Avatar letter for the sender.
    pub fn initial(&self) -> String {
        self.by
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

impl Keyed for Notice {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    #[serde(rename = "On Duty")]
    OnDuty,
}

impl AttendanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::OnDuty => "On Duty",
        }
    }

    /// On duty counts as attended.
    pub fn counts_present(self) -> bool {
        self != Self::Absent
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Present => "status-present",
            Self::Absent => "status-absent",
            Self::OnDuty => "status-on-duty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceConfirmation {
    pub id: String,
    pub course_code: String,
    pub course_name: String,
    pub date: String,
    pub status: AttendanceStatus,
    pub marked_by: String,
}

impl Keyed for AttendanceConfirmation {
    fn key(&self) -> &str {
        &self.id
    }
}
