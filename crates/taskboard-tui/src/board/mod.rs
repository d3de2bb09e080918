/*
[INPUT]:  TaskApi implementation, list page size, typed UI mutations
[OUTPUT]: BoardController owning BoardState; refresh and mutation flows
[POS]:    Board layer - root controller between UI and task service
[UPDATE]: When refresh, mutation, or error surfacing rules change
*/

mod state;

pub use state::{BoardSnapshot, BoardState, LOAD_FAILED, RefreshOutcome};

use std::future::Future;
use std::sync::Arc;

use taskboard_client::{
    ListTasksQuery, Task, TaskApi, TaskInput, TaskPatch, TaskStatus, TaskboardError,
};
use tracing::{info, warn};

/// Blocking notification raised by a failed mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// Write operations the board can route to the task service
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(TaskInput),
    ChangeStatus { id: String, status: TaskStatus },
    Delete { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    ChangeStatus,
    Delete,
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Create(_) => MutationKind::Create,
            Mutation::ChangeStatus { .. } => MutationKind::ChangeStatus,
            Mutation::Delete { .. } => MutationKind::Delete,
        }
    }

    /// Run the mutation against the service; failures become an [`Alert`].
    pub async fn execute<A: TaskApi + ?Sized>(&self, api: &A) -> Result<(), Alert> {
        let result = match self {
            Mutation::Create(input) => api.create_task(input).await.map(|task| {
                info!(task_id = %task.id, "task created");
            }),
            Mutation::ChangeStatus { id, status } => api
                .patch_task(id, &TaskPatch::status(status.clone()))
                .await
                .map(|task| {
                    info!(task_id = %task.id, status = %task.status, "task status changed");
                }),
            Mutation::Delete { id } => api.delete_task(id).await.map(|()| {
                info!(task_id = %id, "task deleted");
            }),
        };
        result.map_err(|err| self.kind().alert(&err))
    }
}

impl MutationKind {
    pub fn failure_message(self) -> &'static str {
        match self {
            MutationKind::Create => "Create failed",
            MutationKind::ChangeStatus => "Update failed",
            MutationKind::Delete => "Delete failed",
        }
    }

    /// Server text verbatim when there is one, otherwise the generic message.
    fn alert(self, err: &TaskboardError) -> Alert {
        warn!(error = %err, operation = ?self, "mutation failed");
        let generic = self.failure_message();
        Alert {
            title: generic.to_string(),
            message: err.server_message().unwrap_or(generic).to_string(),
        }
    }
}

/// First step of the delete protocol: a target awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub title: String,
}

impl PendingDelete {
    pub fn request(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
        }
    }

    /// Consume the confirmation and produce the delete to execute
    pub fn confirm(self) -> Mutation {
        Mutation::Delete { id: self.id }
    }
}

/// Proof that a refresh was started; results are matched against it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    seq: u64,
}

/// Root controller: owns [`BoardState`] and is its only writer
pub struct BoardController<A: TaskApi + ?Sized> {
    api: Arc<A>,
    query: ListTasksQuery,
    state: BoardState,
    refresh_seq: u64,
}

impl<A: TaskApi + ?Sized + 'static> BoardController<A> {
    /// Controller listing the newest `page_size` tasks
    pub fn new(api: Arc<A>, page_size: u32) -> Self {
        Self {
            api,
            query: ListTasksQuery::newest_first(page_size),
            state: BoardState::default(),
            refresh_seq: 0,
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn query(&self) -> &ListTasksQuery {
        &self.query
    }

    pub fn api(&self) -> Arc<A> {
        Arc::clone(&self.api)
    }

    /// Mark a refresh as in flight and hand out its ticket
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.refresh_seq += 1;
        self.state.start_refresh();
        RefreshTicket {
            seq: self.refresh_seq,
        }
    }

    /// Fetch list and stats concurrently; detached from `self` so it can be spawned
    pub fn refresh_future(
        &self,
    ) -> impl Future<Output = Result<BoardSnapshot, TaskboardError>> + Send + 'static {
        let api = Arc::clone(&self.api);
        let query = self.query.clone();
        async move { fetch_snapshot(api.as_ref(), &query).await }
    }

    /// Apply a refresh result; results of superseded refreshes are dropped
    pub fn commit_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<BoardSnapshot, TaskboardError>,
    ) -> RefreshOutcome {
        if ticket.seq != self.refresh_seq {
            info!(seq = ticket.seq, latest = self.refresh_seq, "dropping stale refresh");
            return RefreshOutcome::Stale;
        }
        match result {
            Ok(snapshot) => {
                info!(tasks = snapshot.tasks.len(), "board refreshed");
                self.state.apply_snapshot(snapshot);
                RefreshOutcome::Applied
            }
            Err(err) => {
                warn!(error = %err, "board refresh failed");
                let message = refresh_error_message(&err);
                self.state.apply_failure(message.clone());
                RefreshOutcome::Failed(message)
            }
        }
    }

    /// Full refresh: list and stats, committed together
    pub async fn refresh(&mut self) -> RefreshOutcome {
        let ticket = self.begin_refresh();
        let result = self.refresh_future().await;
        self.commit_refresh(ticket, result)
    }

    /// Run a mutation and, only if it succeeded, refresh
    pub async fn apply(&mut self, mutation: Mutation) -> Result<RefreshOutcome, Alert> {
        mutation.execute(self.api.as_ref()).await?;
        Ok(self.refresh().await)
    }

    pub async fn create(&mut self, input: TaskInput) -> Result<RefreshOutcome, Alert> {
        self.apply(Mutation::Create(input)).await
    }

    pub async fn change_status(
        &mut self,
        id: &str,
        status: TaskStatus,
    ) -> Result<RefreshOutcome, Alert> {
        self.apply(Mutation::ChangeStatus {
            id: id.to_string(),
            status,
        })
        .await
    }

    pub async fn delete(&mut self, pending: PendingDelete) -> Result<RefreshOutcome, Alert> {
        self.apply(pending.confirm()).await
    }
}

async fn fetch_snapshot<A: TaskApi + ?Sized>(
    api: &A,
    query: &ListTasksQuery,
) -> Result<BoardSnapshot, TaskboardError> {
    let (tasks, stats) = tokio::try_join!(api.list_tasks(query), api.task_stats())?;
    Ok(BoardSnapshot { tasks, stats })
}

fn refresh_error_message(err: &TaskboardError) -> String {
    let message = match err.server_message() {
        Some(message) => message.to_string(),
        None => err.to_string(),
    };
    if message.trim().is_empty() {
        LOAD_FAILED.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_client::{ApiCall, ApiOperation, MockTaskApi};

    fn controller() -> (Arc<MockTaskApi>, BoardController<MockTaskApi>) {
        let api = Arc::new(MockTaskApi::new());
        let board = BoardController::new(Arc::clone(&api), 50);
        (api, board)
    }

    #[tokio::test]
    async fn test_initial_state_is_loading() {
        let (_api, board) = controller();
        assert!(board.state().loading);
        assert!(board.state().tasks.is_empty());
        assert_eq!(board.query().limit, 50);
    }

    #[tokio::test]
    async fn test_refresh_fetches_list_and_stats() {
        let (api, mut board) = controller();
        api.seed("older", TaskStatus::Open);
        api.seed("newer", TaskStatus::Done);

        assert_eq!(board.refresh().await, RefreshOutcome::Applied);

        let state = board.state();
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.tasks[0].title, "newer");
        assert_eq!(state.stats.count(&TaskStatus::Done), 1);
        assert!(state.last_synced.is_some());
        assert_eq!(api.call_count(ApiOperation::List), 1);
        assert_eq!(api.call_count(ApiOperation::Stats), 1);
        assert!(api.calls().contains(&ApiCall::List(ListTasksQuery::newest_first(50))));
    }

    #[tokio::test]
    async fn test_create_then_refresh_lists_task() {
        let (api, mut board) = controller();
        let input = TaskInput::new("Draft agenda", None, TaskStatus::Open);

        let outcome = board.create(input).await.expect("create succeeds");
        assert_eq!(outcome, RefreshOutcome::Applied);
        assert!(board.state().tasks.iter().any(|task| task.title == "Draft agenda"));
        assert_eq!(api.call_count(ApiOperation::Create), 1);
        assert_eq!(api.call_count(ApiOperation::List), 1);
    }

    #[tokio::test]
    async fn test_change_status_patches_once_and_refreshes_once() {
        let (api, mut board) = controller();
        let task = api.seed("Review PR", TaskStatus::Open);
        board.refresh().await;
        api.clear_calls();

        board
            .change_status(&task.id, TaskStatus::InProgress)
            .await
            .expect("patch succeeds");

        let calls = api.calls();
        let patches: Vec<&ApiCall> = calls
            .iter()
            .filter(|call| call.operation() == ApiOperation::Patch)
            .collect();
        assert_eq!(
            patches,
            vec![&ApiCall::Patch {
                id: task.id.clone(),
                patch: TaskPatch::status(TaskStatus::InProgress),
            }]
        );
        assert_eq!(api.call_count(ApiOperation::List), 1);
        assert_eq!(api.call_count(ApiOperation::Stats), 1);
        assert_eq!(board.state().tasks[0].status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn test_delete_runs_only_after_confirmation() {
        let (api, mut board) = controller();
        let task = api.seed("Old note", TaskStatus::Done);
        board.refresh().await;
        api.clear_calls();

        let pending = PendingDelete::request(&board.state().tasks[0]);
        assert_eq!(api.call_count(ApiOperation::Delete), 0);

        board.delete(pending).await.expect("delete succeeds");
        assert_eq!(api.calls()[0], ApiCall::Delete(task.id.clone()));
        assert_eq!(api.call_count(ApiOperation::Delete), 1);
        assert_eq!(api.call_count(ApiOperation::List), 1);
        assert!(board.state().tasks.is_empty());
    }

    #[tokio::test]
    async fn test_failed_mutation_alerts_and_skips_refresh() {
        let (api, mut board) = controller();
        api.seed("Keep me", TaskStatus::Open);
        board.refresh().await;
        let before = board.state().tasks.clone();
        api.clear_calls();
        api.fail_next(ApiOperation::Create, Some(400), "Invalid data");

        let alert = board
            .create(TaskInput::new("x", None, TaskStatus::Open))
            .await
            .expect_err("create fails");
        assert_eq!(alert.message, "Invalid data");
        assert_eq!(alert.title, "Create failed");
        assert_eq!(board.state().tasks, before);
        assert_eq!(board.state().error, None);
        assert_eq!(api.call_count(ApiOperation::List), 0);
    }

    #[tokio::test]
    async fn test_failed_mutation_without_server_text_uses_generic_message() {
        let (api, mut board) = controller();
        api.fail_next(ApiOperation::Delete, None, "connection reset");

        let alert = board
            .delete(PendingDelete {
                id: "task-9".to_string(),
                title: "gone".to_string(),
            })
            .await
            .expect_err("delete fails");
        assert_eq!(alert.message, "Delete failed");

        api.fail_next(ApiOperation::Patch, None, "connection reset");
        let alert = board
            .change_status("task-9", TaskStatus::Done)
            .await
            .expect_err("patch fails");
        assert_eq!(alert.message, "Update failed");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_data_and_sets_inline_error() {
        let (api, mut board) = controller();
        api.seed("Visible", TaskStatus::Open);
        board.refresh().await;

        api.fail_next(ApiOperation::Stats, Some(500), "Database error");
        let outcome = board.refresh().await;

        assert_eq!(outcome, RefreshOutcome::Failed("Database error".to_string()));
        let state = board.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Database error"));
        assert_eq!(state.tasks.len(), 1);

        assert_eq!(board.refresh().await, RefreshOutcome::Applied);
        assert_eq!(board.state().error, None);
    }

    #[tokio::test]
    async fn test_transport_failure_message_is_error_text() {
        let (api, mut board) = controller();
        api.fail_next(ApiOperation::List, None, "connection refused");

        let outcome = board.refresh().await;
        assert_eq!(
            outcome,
            RefreshOutcome::Failed("Invalid response: connection refused".to_string())
        );
    }

    #[tokio::test]
    async fn test_stale_refresh_result_is_dropped() {
        let (api, mut board) = controller();
        api.seed("first", TaskStatus::Open);

        let stale_ticket = board.begin_refresh();
        let stale = board.refresh_future().await;
        api.seed("second", TaskStatus::Open);
        let fresh_ticket = board.begin_refresh();
        let fresh = board.refresh_future().await;

        assert_eq!(board.commit_refresh(fresh_ticket, fresh), RefreshOutcome::Applied);
        assert_eq!(board.commit_refresh(stale_ticket, stale), RefreshOutcome::Stale);
        assert_eq!(board.state().tasks.len(), 2);
    }

    #[test]
    fn test_pending_delete_confirm_yields_delete() {
        let pending = PendingDelete {
            id: "t-1".to_string(),
            title: "x".to_string(),
        };
        assert_eq!(pending.confirm(), Mutation::Delete { id: "t-1".to_string() });
    }
}
