/*
[INPUT]:  Crossterm key events and current AppState overlays
[OUTPUT]: KeyOutcome telling the runtime what to spawn next
[POS]:    TUI key routing: alert, then modal, then board keys
[UPDATE]: When keybindings or overlay precedence change
*/

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveModal, AppState};
use super::ui::modal::{ConfirmAction, FormAction, handle_confirm_key, is_dismiss_key};
use super::ui::{ListAction, list_action};
use crate::board::Mutation;

/// Side effects requested by a key press; the runtime runs them off the UI task
#[derive(Debug, Clone, PartialEq)]
pub(super) enum KeyOutcome {
    Continue,
    Quit,
    Refresh,
    Mutate(Mutation),
}

pub(super) fn handle_key_event(app: &mut AppState, key: KeyEvent) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyOutcome::Quit;
    }

    // the alert blocks everything until dismissed
    if app.alert.is_some() {
        if is_dismiss_key(key.code) {
            app.alert = None;
        }
        return KeyOutcome::Continue;
    }

    if app.active_modal.is_some() {
        return handle_modal_key_event(app, key.code);
    }

    match key.code {
        KeyCode::Char('q') => KeyOutcome::Quit,
        KeyCode::Char('r') => KeyOutcome::Refresh,
        KeyCode::Char('l') => {
            app.show_logs = !app.show_logs;
            KeyOutcome::Continue
        }
        KeyCode::Char('n') => {
            app.open_create_task();
            KeyOutcome::Continue
        }
        KeyCode::Up => {
            app.move_selection(-1);
            KeyOutcome::Continue
        }
        KeyCode::Down => {
            app.move_selection(1);
            KeyOutcome::Continue
        }
        code => handle_row_key(app, code),
    }
}

fn handle_row_key(app: &mut AppState, code: KeyCode) -> KeyOutcome {
    // rows are hidden while a refresh is running
    if app.board.state().loading {
        return KeyOutcome::Continue;
    }
    let Some(action) = app.selected_task().and_then(|task| list_action(task, code)) else {
        return KeyOutcome::Continue;
    };
    match action {
        ListAction::ChangeStatus { id, status } => {
            KeyOutcome::Mutate(Mutation::ChangeStatus { id, status })
        }
        ListAction::RequestDelete(pending) => {
            app.request_delete(pending);
            KeyOutcome::Continue
        }
    }
}

fn handle_modal_key_event(app: &mut AppState, code: KeyCode) -> KeyOutcome {
    let busy = app.is_busy();
    match app.active_modal.as_mut() {
        Some(ActiveModal::CreateTask(form)) => match form.handle_key(code, busy) {
            FormAction::Submit(input) => KeyOutcome::Mutate(Mutation::Create(input)),
            FormAction::Cancel => {
                app.close_modal();
                KeyOutcome::Continue
            }
            FormAction::None => KeyOutcome::Continue,
        },
        Some(ActiveModal::ConfirmDelete(_)) => match handle_confirm_key(code) {
            ConfirmAction::Confirm => match app.active_modal.take() {
                Some(ActiveModal::ConfirmDelete(pending)) => KeyOutcome::Mutate(pending.confirm()),
                _ => KeyOutcome::Continue,
            },
            ConfirmAction::Cancel => {
                app.close_modal();
                KeyOutcome::Continue
            }
            ConfirmAction::None => KeyOutcome::Continue,
        },
        None => KeyOutcome::Continue,
    }
}
