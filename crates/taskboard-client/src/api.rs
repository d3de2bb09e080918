/*
[INPUT]:  Task service operations needed by UI controllers
[OUTPUT]: TaskApi trait, HTTP implementation, and in-memory MockTaskApi
[POS]:    Service seam - abstraction over the task service
[UPDATE]: When controllers need new service operations
*/

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::http::{Result, TaskboardClient, TaskboardError};
use crate::types::{
    ListTasksQuery, SortDirection, SortField, Task, TaskInput, TaskPatch, TaskStats, TaskStatus,
};

/// Operations a task board needs from the task service
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self, query: &ListTasksQuery) -> Result<Vec<Task>>;

    async fn task_stats(&self) -> Result<TaskStats>;

    async fn create_task(&self, input: &TaskInput) -> Result<Task>;

    async fn patch_task(&self, id: &str, patch: &TaskPatch) -> Result<Task>;

    async fn delete_task(&self, id: &str) -> Result<()>;
}

#[async_trait]
impl TaskApi for TaskboardClient {
    async fn list_tasks(&self, query: &ListTasksQuery) -> Result<Vec<Task>> {
        TaskboardClient::list_tasks(self, query).await
    }

    async fn task_stats(&self) -> Result<TaskStats> {
        TaskboardClient::task_stats(self).await
    }

    async fn create_task(&self, input: &TaskInput) -> Result<Task> {
        TaskboardClient::create_task(self, input).await
    }

    async fn patch_task(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        TaskboardClient::patch_task(self, id, patch).await
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        TaskboardClient::delete_task(self, id).await
    }
}

#[async_trait]
impl<T: TaskApi + ?Sized> TaskApi for Arc<T> {
    async fn list_tasks(&self, query: &ListTasksQuery) -> Result<Vec<Task>> {
        (**self).list_tasks(query).await
    }

    async fn task_stats(&self) -> Result<TaskStats> {
        (**self).task_stats().await
    }

    async fn create_task(&self, input: &TaskInput) -> Result<Task> {
        (**self).create_task(input).await
    }

    async fn patch_task(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        (**self).patch_task(id, patch).await
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        (**self).delete_task(id).await
    }
}

/// Which [`TaskApi`] operation a call or injected failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    List,
    Stats,
    Create,
    Patch,
    Delete,
}

/// A call observed by [`MockTaskApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List(ListTasksQuery),
    Stats,
    Create(TaskInput),
    Patch { id: String, patch: TaskPatch },
    Delete(String),
}

impl ApiCall {
    pub fn operation(&self) -> ApiOperation {
        match self {
            ApiCall::List(_) => ApiOperation::List,
            ApiCall::Stats => ApiOperation::Stats,
            ApiCall::Create(_) => ApiOperation::Create,
            ApiCall::Patch { .. } => ApiOperation::Patch,
            ApiCall::Delete(_) => ApiOperation::Delete,
        }
    }
}

#[derive(Debug)]
struct InjectedFailure {
    operation: ApiOperation,
    code: Option<u16>,
    message: String,
}

#[derive(Debug, Default)]
struct MockStore {
    tasks: Vec<Task>,
    next_id: u64,
    calls: Vec<ApiCall>,
    failures: Vec<InjectedFailure>,
}

/// In-memory stand-in for the task service
///
/// Behaves like the real service (server-assigned ids and timestamps,
/// sorting, paging, stats) and records every call for assertions.
#[derive(Debug, Default)]
pub struct MockTaskApi {
    store: Mutex<MockStore>,
}

impl MockTaskApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a task as if it had been created on the service
    pub fn seed(&self, title: &str, status: TaskStatus) -> Task {
        self.lock().insert(TaskInput::new(title, None, status))
    }

    /// Fail the next call of `operation` with an API error (`Some(code)`) or
    /// a transport-like error (`None`)
    pub fn fail_next(&self, operation: ApiOperation, code: Option<u16>, message: &str) {
        self.lock().failures.push(InjectedFailure {
            operation,
            code,
            message: message.to_string(),
        });
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, operation: ApiOperation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin(&self, call: ApiCall) -> Result<std::sync::MutexGuard<'_, MockStore>> {
        let mut store = self.lock();
        let operation = call.operation();
        store.calls.push(call);
        if let Some(index) = store
            .failures
            .iter()
            .position(|failure| failure.operation == operation)
        {
            let failure = store.failures.remove(index);
            return Err(match failure.code {
                Some(code) => TaskboardError::Api {
                    code,
                    message: failure.message,
                },
                None => TaskboardError::InvalidResponse(failure.message),
            });
        }
        Ok(store)
    }
}

impl MockStore {
    fn insert(&mut self, input: TaskInput) -> Task {
        self.next_id += 1;
        let stamp = timestamp(self.next_id);
        let task = Task {
            id: format!("task-{}", self.next_id),
            title: input.title,
            description: input.description,
            status: input.status,
            created_at: stamp.clone(),
            updated_at: Some(stamp),
        };
        self.tasks.push(task.clone());
        task
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| TaskboardError::Api {
                code: 404,
                message: "Task not found".to_string(),
            })
    }
}

fn timestamp(seq: u64) -> String {
    format!(
        "2024-01-01T{:02}:{:02}:{:02}Z",
        (seq / 3600) % 24,
        (seq / 60) % 60,
        seq % 60
    )
}

fn status_rank(status: &TaskStatus) -> usize {
    TaskStatus::ORDER
        .iter()
        .position(|known| known == status)
        .unwrap_or(TaskStatus::ORDER.len())
}

#[async_trait]
impl TaskApi for MockTaskApi {
    async fn list_tasks(&self, query: &ListTasksQuery) -> Result<Vec<Task>> {
        let store = self.begin(ApiCall::List(query.clone()))?;
        let mut tasks: Vec<Task> = store
            .tasks
            .iter()
            .filter(|task| query.status.as_ref().is_none_or(|status| &task.status == status))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| match query.sort {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::Status => status_rank(&a.status).cmp(&status_rank(&b.status)),
        });
        if query.direction == SortDirection::Desc {
            tasks.reverse();
        }
        Ok(tasks
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn task_stats(&self) -> Result<TaskStats> {
        let store = self.begin(ApiCall::Stats)?;
        let mut stats = TaskStats::default();
        for task in &store.tasks {
            *stats.0.entry(task.status.as_str().to_string()).or_insert(0) += 1;
        }
        Ok(stats)
    }

    async fn create_task(&self, input: &TaskInput) -> Result<Task> {
        let mut store = self.begin(ApiCall::Create(input.clone()))?;
        Ok(store.insert(input.clone()))
    }

    async fn patch_task(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        let mut store = self.begin(ApiCall::Patch {
            id: id.to_string(),
            patch: patch.clone(),
        })?;
        store.next_id += 1;
        let stamp = timestamp(store.next_id);
        let task = store.find_mut(id)?;
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = &patch.status {
            task.status = status.clone();
        }
        task.updated_at = Some(stamp);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        let mut store = self.begin(ApiCall::Delete(id.to_string()))?;
        store.find_mut(id)?;
        store.tasks.retain(|task| task.id != id);
        Ok(())
    }
}
