/*
[INPUT]:  Task service schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::{DateField, SortDirection, SortField, TaskStatus};

/// Longest title the service accepts, in characters.
pub const MAX_TITLE_LEN: usize = 255;

/// Query string for `GET /tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListTasksQuery {
    pub sort: SortField,
    pub direction: SortDirection,
    pub limit: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_field_filter: Option<DateField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
}

impl Default for ListTasksQuery {
    fn default() -> Self {
        Self::newest_first(50)
    }
}

impl ListTasksQuery {
    /// Newest tasks first, starting at offset zero.
    pub fn newest_first(limit: u32) -> Self {
        Self {
            sort: SortField::CreatedAt,
            direction: SortDirection::Desc,
            limit,
            offset: 0,
            status: None,
            date_field_filter: None,
            since: None,
            until: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn sorted_by(mut self, sort: SortField, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    /// Restrict to tasks whose `field` falls within `since..=until` (`YYYY-MM-DD`).
    ///
    /// An open bound is left out of the query string.
    pub fn within_dates(
        mut self,
        field: DateField,
        since: Option<String>,
        until: Option<String>,
    ) -> Self {
        self.date_field_filter = Some(field);
        self.since = since;
        self.until = until;
        self
    }
}

/// Body for `POST /tasks` and `PUT /tasks/{id}`.
///
/// `description` is always serialized; an absent description goes out as
/// JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}

impl TaskInput {
    pub fn new(title: impl Into<String>, description: Option<String>, status: TaskStatus) -> Self {
        Self {
            title: title.into(),
            description,
            status,
        }
    }
}

/// Body for `PATCH /tasks/{id}`; only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}
