/*
[INPUT]:  Task identifiers, list queries, and create/patch payloads
[OUTPUT]: Tasks and per-status stats from the task service
[POS]:    HTTP layer - /tasks endpoints
[UPDATE]: When adding new task endpoints or changing query parameters
*/

use reqwest::Method;
use tracing::debug;

use crate::http::{Result, TaskboardClient, TaskboardError};
use crate::types::{ListTasksQuery, MAX_TITLE_LEN, Task, TaskInput, TaskPatch, TaskStats};

impl TaskboardClient {
    /// List tasks
    ///
    /// GET /tasks?sort={sort}&direction={direction}&limit={limit}&offset={offset}
    pub async fn list_tasks(&self, query: &ListTasksQuery) -> Result<Vec<Task>> {
        let builder = self.request(Method::GET, "/tasks")?.query(query);
        let tasks: Vec<Task> = self.send_json(builder).await?;
        debug!(count = tasks.len(), "tasks listed");
        Ok(tasks)
    }

    /// Per-status task counts
    ///
    /// GET /tasks/stats
    pub async fn task_stats(&self) -> Result<TaskStats> {
        let builder = self.request(Method::GET, "/tasks/stats")?;
        self.send_json(builder).await
    }

    /// Fetch a single task
    ///
    /// GET /tasks/{id}
    pub async fn get_task(&self, id: &str) -> Result<Task> {
        let builder = self.task_request(Method::GET, id)?;
        self.send_json(builder).await
    }

    /// Create a task
    ///
    /// POST /tasks
    pub async fn create_task(&self, input: &TaskInput) -> Result<Task> {
        validate_title(&input.title)?;
        let builder = self.request(Method::POST, "/tasks")?.json(input);
        self.send_json(builder).await
    }

    /// Replace every writable field of a task
    ///
    /// PUT /tasks/{id}
    pub async fn replace_task(&self, id: &str, input: &TaskInput) -> Result<Task> {
        validate_title(&input.title)?;
        let builder = self.task_request(Method::PUT, id)?.json(input);
        self.send_json(builder).await
    }

    /// Update the fields set on `patch`
    ///
    /// PATCH /tasks/{id}
    pub async fn patch_task(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        if patch.is_empty() {
            return Err(TaskboardError::Validation("patch has no fields".to_string()));
        }
        if let Some(title) = patch.title.as_deref() {
            validate_title(title)?;
        }
        let builder = self.task_request(Method::PATCH, id)?.json(patch);
        self.send_json(builder).await
    }

    /// Delete a task
    ///
    /// DELETE /tasks/{id}
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        let builder = self.task_request(Method::DELETE, id)?;
        self.send_empty(builder).await
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(TaskboardError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TaskboardError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}
