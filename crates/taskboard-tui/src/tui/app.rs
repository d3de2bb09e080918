/*
[INPUT]:  BoardController, log buffer, API base URL, async refresh/mutation results
[OUTPUT]: AppState holding board, selection, overlays, and status line
[POS]:    TUI app state between key routing and rendering
[UPDATE]: When overlays, selection rules, or completion handling change
*/

use ratatui::widgets::TableState;
use taskboard_client::{Task, TaskApi, TaskboardError};
use tracing::info;

use crate::board::{
    Alert, BoardController, BoardSnapshot, MutationKind, PendingDelete, RefreshOutcome,
    RefreshTicket,
};
use crate::tui::LogBufferHandle;
use crate::tui::ui::modal::CreateTaskModal;

#[derive(Debug)]
pub(super) enum ActiveModal {
    CreateTask(CreateTaskModal),
    ConfirmDelete(PendingDelete),
}

pub(super) struct AppState {
    pub(super) board: BoardController<dyn TaskApi>,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) api_base: String,
    pub(super) table_state: TableState,
    pub(super) active_modal: Option<ActiveModal>,
    pub(super) alert: Option<Alert>,
    pub(super) status_message: String,
    pub(super) show_logs: bool,
    pending_mutations: usize,
}

impl AppState {
    pub(super) fn new(
        board: BoardController<dyn TaskApi>,
        log_buffer: LogBufferHandle,
        api_base: String,
    ) -> Self {
        Self {
            board,
            log_buffer,
            api_base,
            table_state: TableState::default(),
            active_modal: None,
            alert: None,
            status_message: "Ready".to_string(),
            show_logs: false,
            pending_mutations: 0,
        }
    }

    /// A refresh or a mutation is on the wire
    pub(super) fn is_busy(&self) -> bool {
        self.board.state().loading || self.pending_mutations > 0
    }

    pub(super) fn selected_task(&self) -> Option<&Task> {
        let index = self.table_state.selected()?;
        self.board.state().tasks.get(index)
    }

    pub(super) fn move_selection(&mut self, delta: i32) {
        let len = self.board.state().tasks.len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as i32;
        let next = (current + delta).clamp(0, len as i32 - 1) as usize;
        self.table_state.select(Some(next));
    }

    /// Keep the selection on a valid row after the list was replaced
    pub(super) fn sync_selection(&mut self) {
        let len = self.board.state().tasks.len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            None => self.table_state.select(Some(0)),
            Some(selected) if selected >= len => self.table_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    pub(super) fn open_create_task(&mut self) {
        self.active_modal = Some(ActiveModal::CreateTask(CreateTaskModal::new()));
    }

    pub(super) fn request_delete(&mut self, pending: PendingDelete) {
        self.active_modal = Some(ActiveModal::ConfirmDelete(pending));
    }

    pub(super) fn close_modal(&mut self) {
        self.active_modal = None;
    }

    pub(super) fn begin_mutation(&mut self) {
        self.pending_mutations += 1;
    }

    pub(super) fn on_refreshed(
        &mut self,
        ticket: RefreshTicket,
        result: Result<BoardSnapshot, TaskboardError>,
    ) {
        match self.board.commit_refresh(ticket, result) {
            RefreshOutcome::Applied => {
                self.sync_selection();
                self.status_message = format!("{} tasks loaded", self.board.state().tasks.len());
            }
            RefreshOutcome::Failed(_) => {
                self.status_message = "Refresh failed".to_string();
            }
            RefreshOutcome::Stale => {}
        }
    }

    /// Returns `true` when the mutation succeeded and a refresh should follow.
    pub(super) fn on_mutated(&mut self, kind: MutationKind, result: Result<(), Alert>) -> bool {
        self.pending_mutations = self.pending_mutations.saturating_sub(1);
        match result {
            Ok(()) => {
                if kind == MutationKind::Create
                    && matches!(
                        &self.active_modal,
                        Some(ActiveModal::CreateTask(form)) if form.is_submitted()
                    )
                {
                    self.close_modal();
                }
                self.status_message = match kind {
                    MutationKind::Create => "Task created",
                    MutationKind::ChangeStatus => "Task updated",
                    MutationKind::Delete => "Task deleted",
                }
                .to_string();
                true
            }
            Err(alert) => {
                if kind == MutationKind::Create {
                    if let Some(ActiveModal::CreateTask(form)) = self.active_modal.as_mut() {
                        form.mark_unsent();
                    }
                }
                info!(title = %alert.title, "showing mutation alert");
                self.status_message = alert.title.clone();
                self.alert = Some(alert);
                false
            }
        }
    }
}

#[cfg(test)]
pub(super) mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::tui::runtime::LogBuffer;
    use crate::tui::ui::modal::FormAction;
    use crossterm::event::KeyCode;
    use taskboard_client::{MockTaskApi, TaskStatus};

    pub(in crate::tui) fn app_with(api: Arc<MockTaskApi>) -> AppState {
        let api: Arc<dyn TaskApi> = api;
        AppState::new(
            BoardController::new(api, 50),
            Arc::new(Mutex::new(LogBuffer::new(16))),
            "http://127.0.0.1:8000/".to_string(),
        )
    }

    pub(in crate::tui) async fn loaded_app(titles: &[&str]) -> (AppState, Arc<MockTaskApi>) {
        let api = Arc::new(MockTaskApi::new());
        for title in titles {
            api.seed(title, TaskStatus::Open);
        }
        let mut app = app_with(Arc::clone(&api));
        let ticket = app.board.begin_refresh();
        let result = app.board.refresh_future().await;
        app.on_refreshed(ticket, result);
        api.clear_calls();
        (app, api)
    }

    #[tokio::test]
    async fn test_selection_follows_list_length() {
        let (mut app, _api) = loaded_app(&["a", "b", "c"]).await;
        assert_eq!(app.table_state.selected(), Some(0));

        app.move_selection(5);
        assert_eq!(app.table_state.selected(), Some(2));
        app.move_selection(-1);
        assert_eq!(app.table_state.selected(), Some(1));

        app.table_state.select(Some(9));
        app.sync_selection();
        assert_eq!(app.table_state.selected(), Some(2));
    }

    #[tokio::test]
    async fn test_failed_mutation_raises_alert_and_keeps_draft() {
        let (mut app, _api) = loaded_app(&["a"]).await;
        app.open_create_task();
        app.begin_mutation();
        assert!(app.is_busy());

        let alert = Alert {
            title: MutationKind::Create.failure_message().to_string(),
            message: MutationKind::Create.failure_message().to_string(),
        };
        let refresh = app.on_mutated(MutationKind::Create, Err(alert));
        assert!(!refresh);
        assert!(!app.is_busy());
        assert!(matches!(app.active_modal, Some(ActiveModal::CreateTask(_))));
        assert_eq!(
            app.alert.as_ref().map(|alert| alert.message.as_str()),
            Some("Create failed")
        );
    }

    #[tokio::test]
    async fn test_successful_create_closes_form() {
        let (mut app, _api) = loaded_app(&[]).await;
        app.open_create_task();
        submit_draft(&mut app, "first");
        app.begin_mutation();
        assert!(app.on_mutated(MutationKind::Create, Ok(())));
        assert!(app.active_modal.is_none());
        assert!(app.alert.is_none());
    }

    #[tokio::test]
    async fn test_late_create_success_keeps_newer_draft() {
        let (mut app, _api) = loaded_app(&[]).await;
        app.open_create_task();
        submit_draft(&mut app, "first");
        app.begin_mutation();
        app.close_modal();

        app.open_create_task();
        type_title(&mut app, "second");
        assert!(app.on_mutated(MutationKind::Create, Ok(())));

        match &app.active_modal {
            Some(ActiveModal::CreateTask(form)) => assert_eq!(form.title(), "second"),
            other => panic!("expected the create form to stay open, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_create_can_be_resubmitted() {
        let (mut app, _api) = loaded_app(&[]).await;
        app.open_create_task();
        submit_draft(&mut app, "retry me");
        app.begin_mutation();
        let alert = Alert {
            title: "Create failed".to_string(),
            message: "Create failed".to_string(),
        };
        assert!(!app.on_mutated(MutationKind::Create, Err(alert)));
        app.alert = None;

        submit_draft(&mut app, "");
        app.begin_mutation();
        assert!(app.on_mutated(MutationKind::Create, Ok(())));
        assert!(app.active_modal.is_none());
    }

    fn type_title(app: &mut AppState, title: &str) {
        let Some(ActiveModal::CreateTask(form)) = app.active_modal.as_mut() else {
            panic!("create form is not open");
        };
        for ch in title.chars() {
            assert_eq!(form.handle_key(KeyCode::Char(ch), false), FormAction::None);
        }
    }

    fn submit_draft(app: &mut AppState, title: &str) {
        type_title(app, title);
        let Some(ActiveModal::CreateTask(form)) = app.active_modal.as_mut() else {
            panic!("create form is not open");
        };
        // Enter walks the fields until it lands on the Create button.
        for _ in 0..4 {
            if let FormAction::Submit(_) = form.handle_key(KeyCode::Enter, false) {
                assert!(form.is_submitted());
                return;
            }
        }
        panic!("draft was not submitted");
    }
}
