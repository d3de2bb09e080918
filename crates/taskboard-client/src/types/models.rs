/*
[INPUT]:  Task service schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::enums::TaskStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Per-status task counts as computed by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStats(pub HashMap<String, u64>);

impl TaskStats {
    /// Count for a status; statuses the service omitted read as zero.
    pub fn count(&self, status: &TaskStatus) -> u64 {
        self.0.get(status.as_str()).copied().unwrap_or(0)
    }
}

impl FromIterator<(String, u64)> for TaskStats {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        TaskStats(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_decodes_without_optional_fields() {
        let raw = r#"{
            "id": "5f0c",
            "title": "Write report",
            "status": "open",
            "created_at": "2024-05-01T10:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(raw).expect("decode task");
        assert_eq!(task.description, None);
        assert_eq!(task.updated_at, None);
        assert_eq!(task.status, TaskStatus::Open);
    }

    #[test]
    fn test_task_decodes_null_description_and_unknown_status() {
        let raw = r#"{
            "id": "5f0c",
            "title": "Write report",
            "description": null,
            "status": "blocked",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-02T10:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(raw).expect("decode task");
        assert_eq!(task.status, TaskStatus::Other("blocked".to_string()));
        assert_eq!(task.updated_at.as_deref(), Some("2024-05-02T10:00:00Z"));
    }

    #[test]
    fn test_stats_missing_status_counts_as_zero() {
        let stats: TaskStats = serde_json::from_str(r#"{"open": 2}"#).expect("decode stats");
        assert_eq!(stats.count(&TaskStatus::Open), 2);
        assert_eq!(stats.count(&TaskStatus::InProgress), 0);
        assert_eq!(stats.count(&TaskStatus::Done), 0);
    }
}
