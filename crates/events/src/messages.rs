use crate::error::EventsError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A short, user-facing message (the dashboard's "toast").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub timestamp: DateTime<Utc>,
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, description)
    }
}

/// Every event published while the dashboard is running.
///
/// Serialized with `#[serde(tag = "type", content = "payload")]`, so a notice
/// looks like `{"type": "Notice", "payload": {"level": "Error", ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum DashboardEvent {
    /// A message meant for the user.
    Notice(Notice),
    /// An upload passed the file-type check and is being processed.
    UploadStarted { file_name: String },
    /// The record set was replaced as a whole.
    RecordsReplaced { count: usize, source: String },
}

impl DashboardEvent {
    pub fn to_json(&self) -> Result<String, EventsError> {
        Ok(serde_json::to_string(self)?)
    }
}
