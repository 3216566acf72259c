use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::iso_date_serde;

/// Task status as the backend reports it. Anything outside the known set
/// still deserializes so one odd record cannot sink a whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Completed,
    #[serde(other)]
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for Priority {
    // The backend fills in "medium" when a task is created without one.
    fn default() -> Self {
        Self::Medium
    }
}

/// One record of the backend's task-list payload. Ids are opaque document
/// ids, not numbers. Timestamps are nullable; a null means "unscheduled".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,

    pub description: String,

    #[serde(default)]
    pub priority: Priority,

    pub status: Status,

    #[serde(default, with = "iso_date_serde::option")]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default, with = "iso_date_serde::option")]
    pub end_time: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}
