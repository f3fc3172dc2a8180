//! Task records
//!
//! Tasks track long-running control-plane work. Their timestamps are RFC 3339
//! strings that may be empty, so they are kept as text and parsed on demand.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task waiting for events
pub const TASK_WAITING: &str = "waiting";
/// Task running
pub const TASK_RUNNING: &str = "running";
/// Task cancelled
pub const TASK_CANCELLED: &str = "cancelled";
/// Task done
pub const TASK_DONE: &str = "done";

/// A background task of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Numeric id
    pub id: u64,
    /// Task type
    #[serde(rename = "type", default)]
    pub task_type: String,
    /// Owning project id
    #[serde(default)]
    pub project_id: u64,
    /// Events the task still waits for
    #[serde(default)]
    pub waiting_events: Vec<String>,
    /// Task parameters, kept opaque
    #[serde(default)]
    pub params: serde_json::Value,
    /// Status
    #[serde(default)]
    pub status: String,
    /// Who completed the task
    #[serde(default)]
    pub completed_by: Option<String>,
    /// Completion time
    #[serde(default)]
    pub completed_at: Option<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Held by an operator
    #[serde(default)]
    pub hold: bool,
}

impl Task {
    /// Whether the task reached `done` or `cancelled`.
    pub fn is_finished(&self) -> bool {
        self.status == TASK_DONE || self.status == TASK_CANCELLED
    }

    /// Status, suffixed with ` (hold)` when held.
    pub fn status_with_hold(&self) -> String {
        if self.hold {
            format!("{} (hold)", self.status)
        } else {
            self.status.clone()
        }
    }

    /// Parsed creation time.
    pub fn created_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_time(self.created_at.as_deref())
    }

    /// Parsed update time.
    pub fn updated_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_time(self.updated_at.as_deref())
    }

    /// Parsed completion time.
    pub fn completed_time(&self) -> Option<DateTime<FixedOffset>> {
        parse_time(self.completed_at.as_deref())
    }

    /// Most recent of the creation, completion and update times, with its
    /// label (`created`, `completed` or `updated`). `None` when the task has
    /// no valid creation time.
    pub fn latest_time(&self) -> Option<(&'static str, DateTime<FixedOffset>)> {
        let mut latest = ("created", self.created_time()?);
        if let Some(completed) = self.completed_time()
            && completed > latest.1
        {
            latest = ("completed", completed);
        }
        if let Some(updated) = self.updated_time()
            && updated > latest.1
        {
            latest = ("updated", updated);
        }
        Some(latest)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "task of type {} for project {} with id: {} and status {}",
            self.task_type, self.project_id, self.id, self.status
        )
    }
}

fn parse_time(raw: Option<&str>) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn task(status: &str, hold: bool) -> Task {
        Task {
            id: 7,
            task_type: "provision".into(),
            project_id: 3,
            waiting_events: Vec::new(),
            params: serde_json::Value::Null,
            status: status.into(),
            completed_by: None,
            completed_at: None,
            created_at: Some("2024-03-01T10:00:00Z".into()),
            updated_at: None,
            hold,
        }
    }

    #[rstest]
    #[case(TASK_WAITING, false)]
    #[case(TASK_RUNNING, false)]
    #[case(TASK_CANCELLED, true)]
    #[case(TASK_DONE, true)]
    fn test_is_finished(#[case] status: &str, #[case] finished: bool) {
        assert_eq!(task(status, false).is_finished(), finished);
    }

    #[test]
    fn test_status_with_hold() {
        assert_eq!(task(TASK_WAITING, true).status_with_hold(), "waiting (hold)");
        assert_eq!(task(TASK_RUNNING, false).status_with_hold(), "running");
    }

    #[test]
    fn test_latest_time() {
        let mut t = task(TASK_DONE, false);
        t.completed_at = Some("2024-03-01T11:00:00Z".into());
        t.updated_at = Some("not a date".into());

        let (label, at) = t.latest_time().unwrap();
        assert_eq!(label, "completed");
        assert_eq!(at.to_rfc3339(), "2024-03-01T11:00:00+00:00");

        t.created_at = Some(String::new());
        assert!(t.latest_time().is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            task(TASK_RUNNING, false).to_string(),
            "task of type provision for project 3 with id: 7 and status running"
        );
    }
}
