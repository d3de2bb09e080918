/*
[INPUT]:  Task creation draft (title, description) and key events
[OUTPUT]: Create task modal rendering and validated TaskInput submissions
[POS]:    TUI UI modal create task form
[UPDATE]: When the create form fields or validation rules change
*/

use crossterm::event::KeyCode;
use taskboard_client::{MAX_TITLE_LEN, TaskInput, TaskStatus};

use super::{Field, Modal, ModalAction, handle_modal_key};

const TITLE_FIELD: usize = 0;
const DESCRIPTION_FIELD: usize = 1;

/// What the form asks the board to do after a key press
#[derive(Debug, Clone, PartialEq)]
pub(in crate::tui) enum FormAction {
    Submit(TaskInput),
    Cancel,
    None,
}

/// Draft state of the create form; lives only while the modal is open
#[derive(Debug, Default)]
pub(in crate::tui) struct CreateTaskModal {
    title: String,
    description: String,
    focus_index: usize,
    hint: Option<String>,
    // Set once this draft has been sent; a success only closes a submitted draft.
    submitted: bool,
}

impl CreateTaskModal {
    pub(in crate::tui) fn new() -> Self {
        Self::default()
    }

    pub(in crate::tui) fn to_modal(&self, busy: bool) -> Modal {
        let hint = self.hint.clone().or_else(|| {
            if busy {
                Some(String::from("Saving..."))
            } else if self.title.trim().is_empty() {
                Some(String::from("Title is required"))
            } else {
                None
            }
        });

        Modal {
            title: String::from("Add Task"),
            focus_index: self.focus_index,
            fields: vec![
                Field::TextInput {
                    label: String::from("Title"),
                    value: self.title.clone(),
                    placeholder: String::from("Enter task title"),
                    max_chars: Some(MAX_TITLE_LEN),
                },
                Field::TextInput {
                    label: String::from("Description"),
                    value: self.description.clone(),
                    placeholder: String::from("Optional notes"),
                    max_chars: None,
                },
                Field::Button {
                    label: String::from("Create"),
                    action: ModalAction::Submit,
                },
                Field::Button {
                    label: String::from("Cancel"),
                    action: ModalAction::Cancel,
                },
            ],
            hint,
        }
    }

    /// Submission is refused while the board is busy or the title is blank.
    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode, busy: bool) -> FormAction {
        let mut modal = self.to_modal(busy);
        let action = handle_modal_key(&mut modal, key);
        self.apply_modal_state(&modal);

        match action {
            ModalAction::Cancel => FormAction::Cancel,
            ModalAction::Submit if busy => {
                self.hint = Some(String::from("Wait for the current request to finish"));
                FormAction::None
            }
            ModalAction::Submit => match self.submission() {
                Some(input) => {
                    self.hint = None;
                    self.submitted = true;
                    FormAction::Submit(input)
                }
                None => {
                    self.hint = Some(String::from("Title is required"));
                    self.focus_index = TITLE_FIELD;
                    FormAction::None
                }
            },
            ModalAction::None => {
                if matches!(key, KeyCode::Char(_) | KeyCode::Backspace) {
                    self.hint = None;
                }
                FormAction::None
            }
        }
    }

    /// Trimmed title, blank description as `None`, status `open`
    pub(in crate::tui) fn submission(&self) -> Option<TaskInput> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let description = if self.description.trim().is_empty() {
            None
        } else {
            Some(self.description.clone())
        };
        Some(TaskInput::new(title, description, TaskStatus::Open))
    }

    pub(in crate::tui) fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Re-arms the draft after a failed create so it can be sent again.
    pub(in crate::tui) fn mark_unsent(&mut self) {
        self.submitted = false;
    }

    pub(in crate::tui) fn title(&self) -> &str {
        self.title.as_str()
    }

    pub(in crate::tui) fn description(&self) -> &str {
        self.description.as_str()
    }

    fn apply_modal_state(&mut self, modal: &Modal) {
        self.focus_index = modal.focus_index;
        if let Some(Field::TextInput { value, .. }) = modal.fields.get(TITLE_FIELD) {
            self.title = value.clone();
        }
        if let Some(Field::TextInput { value, .. }) = modal.fields.get(DESCRIPTION_FIELD) {
            self.description = value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(form: &mut CreateTaskModal, text: &str) {
        for ch in text.chars() {
            assert_eq!(form.handle_key(KeyCode::Char(ch), false), FormAction::None);
        }
    }

    fn submit(form: &mut CreateTaskModal, busy: bool) -> FormAction {
        // title -> description -> [Create]
        form.handle_key(KeyCode::Tab, busy);
        form.handle_key(KeyCode::Tab, busy);
        form.handle_key(KeyCode::Enter, busy)
    }

    #[test]
    fn test_whitespace_title_is_not_submitted() {
        let mut form = CreateTaskModal::new();
        type_text(&mut form, "   ");
        assert_eq!(submit(&mut form, false), FormAction::None);
        assert_eq!(form.title(), "   ");
        assert_eq!(form.to_modal(false).hint.as_deref(), Some("Title is required"));
    }

    #[test]
    fn test_submission_trims_title_and_drops_blank_description() {
        let mut form = CreateTaskModal::new();
        type_text(&mut form, "  Plan sprint ");
        form.handle_key(KeyCode::Tab, false);
        type_text(&mut form, "  ");

        let action = form.handle_key(KeyCode::Tab, false);
        assert_eq!(action, FormAction::None);
        assert_eq!(
            form.handle_key(KeyCode::Enter, false),
            FormAction::Submit(TaskInput::new("Plan sprint", None, TaskStatus::Open))
        );
    }

    #[test]
    fn test_description_is_kept_when_present() {
        let mut form = CreateTaskModal::new();
        type_text(&mut form, "Call vendor");
        form.handle_key(KeyCode::Tab, false);
        type_text(&mut form, "ask about invoice");
        assert_eq!(form.description(), "ask about invoice");

        let input = form.submission().expect("valid draft");
        assert_eq!(input.description.as_deref(), Some("ask about invoice"));
        assert_eq!(input.status, TaskStatus::Open);
    }

    #[test]
    fn test_submit_blocked_while_busy() {
        let mut form = CreateTaskModal::new();
        type_text(&mut form, "Ship release");
        assert_eq!(submit(&mut form, true), FormAction::None);
        assert_eq!(
            form.to_modal(true).hint.as_deref(),
            Some("Wait for the current request to finish")
        );
        // focus stays on the submit button
        assert!(matches!(
            form.handle_key(KeyCode::Enter, false),
            FormAction::Submit(_)
        ));
    }

    #[test]
    fn test_only_sent_drafts_are_marked_submitted() {
        let mut form = CreateTaskModal::new();
        type_text(&mut form, "Ship release");
        assert!(!form.is_submitted());
        assert_eq!(submit(&mut form, true), FormAction::None);
        assert!(!form.is_submitted());

        assert!(matches!(
            form.handle_key(KeyCode::Enter, false),
            FormAction::Submit(_)
        ));
        assert!(form.is_submitted());
        form.mark_unsent();
        assert!(!form.is_submitted());
    }

    #[test]
    fn test_title_capped_at_max_length() {
        let mut form = CreateTaskModal::new();
        let long = "x".repeat(MAX_TITLE_LEN + 10);
        type_text(&mut form, &long);
        assert_eq!(form.title().chars().count(), MAX_TITLE_LEN);
    }

    #[test]
    fn test_escape_cancels() {
        let mut form = CreateTaskModal::new();
        type_text(&mut form, "draft");
        assert_eq!(form.handle_key(KeyCode::Esc, false), FormAction::Cancel);
    }
}
