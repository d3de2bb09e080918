/*
[INPUT]:  Task list and stats snapshots from refreshes
[OUTPUT]: BoardState owned by the board controller
[POS]:    Board layer - cached view of the task service
[UPDATE]: When the cached board data or refresh flags change
*/

use chrono::{DateTime, Local};
use taskboard_client::{Task, TaskStats};

/// Message shown when a refresh fails without any usable error text
pub const LOAD_FAILED: &str = "Failed to load";

/// Task list and stats fetched together by one refresh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardSnapshot {
    pub tasks: Vec<Task>,
    pub stats: TaskStats,
}

/// Authoritative client-side copy of the board
///
/// `tasks` and `stats` are only ever replaced together. `error` carries the
/// last refresh failure and is cleared when the next refresh starts.
#[derive(Debug, Clone)]
pub struct BoardState {
    pub tasks: Vec<Task>,
    pub stats: TaskStats,
    pub loading: bool,
    pub error: Option<String>,
    pub last_synced: Option<DateTime<Local>>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            stats: TaskStats::default(),
            loading: true,
            error: None,
            last_synced: None,
        }
    }
}

impl BoardState {
    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub(super) fn start_refresh(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(super) fn apply_snapshot(&mut self, snapshot: BoardSnapshot) {
        self.tasks = snapshot.tasks;
        self.stats = snapshot.stats;
        self.loading = false;
        self.last_synced = Some(Local::now());
    }

    pub(super) fn apply_failure(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}

/// What happened to a refresh result handed back to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    Failed(String),
    /// A newer refresh was started; this result was dropped
    Stale,
}
