use jiff::{Timestamp, tz::TimeZone};
use serde::{Deserialize, Serialize};

use crate::{Keyed, matches_query};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Academic,
    Administrative,
    Student,
    System,
    Maintenance,
}

impl NotificationKind {
    pub const ALL: [Self; 5] = [
        Self::Academic,
        Self::Administrative,
        Self::Student,
        Self::System,
        Self::Maintenance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Administrative => "administrative",
            Self::Student => "student",
            Self::System => "system",
            Self::Maintenance => "maintenance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
    Read,
    Unread,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherNotification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub status: ReadStatus,
    pub priority: Priority,
    pub timestamp: Timestamp,
    pub sender: String,
}

impl TeacherNotification {
    pub fn is_unread(&self) -> bool {
        self.status == ReadStatus::Unread
    }
}

impl Keyed for TeacherNotification {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Read,
    Unread,
}

impl StatusFilter {
    pub fn parse(s: &str) -> Self {
        match s {
            "read" => Self::Read,
            "unread" => Self::Unread,
            _ => Self::All,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationFilter {
    pub query: String,
    pub status: StatusFilter,
    pub kind: Option<NotificationKind>,
}

impl NotificationFilter {
    pub fn matches(&self, n: &TeacherNotification) -> bool {
        let status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Read => n.status == ReadStatus::Read,
            StatusFilter::Unread => n.status == ReadStatus::Unread,
        };
        let kind = self.kind.is_none_or(|k| k == n.kind);

        status && kind && matches_query(&self.query, &[&n.title, &n.message, &n.sender])
    }
}

/// Short age of `at` relative to `now`: "Just now", "5h ago", "3d ago",
/// otherwise the calendar date in `tz`.
pub fn relative_time(at: Timestamp, now: Timestamp, tz: &TimeZone) -> String {
    let hours = (now.as_second() - at.as_second()).div_euclid(3600);
    if hours < 1 {
        return "Just now".to_string();
    }
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days}d ago");
    }
    at.to_zoned(tz.clone()).strftime("%d/%m/%Y").to_string()
}
