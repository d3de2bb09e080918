/*
[INPUT]:  Task service schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Task status as reported by the task service.
///
/// The service only emits the three known values, but decoding never fails:
/// anything else is kept verbatim in [`TaskStatus::Other`] so callers can
/// render it with a neutral fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Open,
    InProgress,
    Done,
    Other(String),
}

impl TaskStatus {
    /// Known statuses in display order.
    pub const ORDER: [TaskStatus; 3] = [TaskStatus::Open, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TaskStatus::Other(_))
    }
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "open" => TaskStatus::Open,
            "in_progress" => TaskStatus::InProgress,
            "done" => TaskStatus::Done,
            _ => TaskStatus::Other(value),
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(value: &str) -> Self {
        TaskStatus::from(value.to_string())
    }
}

impl From<TaskStatus> for String {
    fn from(value: TaskStatus) -> Self {
        match value {
            TaskStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Timestamp column used by the `since`/`until` list window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    #[default]
    CreatedAt,
    UpdatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_decodes_known_values() {
        let status: TaskStatus = serde_json::from_str("\"in_progress\"").expect("decode");
        assert_eq!(status, TaskStatus::InProgress);
        assert_eq!(serde_json::to_string(&TaskStatus::Done).expect("encode"), "\"done\"");
    }

    #[test]
    fn test_status_keeps_unknown_values() {
        let status: TaskStatus = serde_json::from_str("\"archived\"").expect("decode");
        assert_eq!(status, TaskStatus::Other("archived".to_string()));
        assert!(!status.is_known());
        assert_eq!(serde_json::to_string(&status).expect("encode"), "\"archived\"");
    }

    #[test]
    fn test_sort_options_serialize_as_query_values() {
        assert_eq!(serde_json::to_string(&SortField::CreatedAt).expect("encode"), "\"created_at\"");
        assert_eq!(serde_json::to_string(&SortDirection::Desc).expect("encode"), "\"desc\"");
        assert_eq!(serde_json::to_string(&DateField::UpdatedAt).expect("encode"), "\"updated_at\"");
    }
}
