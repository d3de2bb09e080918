/*
[INPUT]:  Modal state, fields, and key events
[OUTPUT]: Modal rendering output and modal action results
[POS]:    TUI UI modal module root
[UPDATE]: When adding modal kinds or changing field editing keys
*/

mod alert;
mod confirm_delete;
mod create_task;

pub(in crate::tui) use alert::{draw_alert, is_dismiss_key};
pub(in crate::tui) use confirm_delete::{ConfirmAction, draw_confirm_delete, handle_confirm_key};
pub(in crate::tui) use create_task::{CreateTaskModal, FormAction};

use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::runtime::border_style;

pub(in crate::tui) struct Modal {
    pub(super) title: String,
    pub(super) focus_index: usize,
    pub(super) fields: Vec<Field>,
    pub(super) hint: Option<String>,
}

pub(in crate::tui) enum Field {
    TextInput {
        label: String,
        value: String,
        placeholder: String,
        max_chars: Option<usize>,
    },
    Button {
        label: String,
        action: ModalAction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui) enum ModalAction {
    Submit,
    Cancel,
    None,
}

pub(in crate::tui) fn draw_modal(frame: &mut ratatui::Frame, area: Rect, modal: &Modal) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(modal.title.as_str());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for (index, field) in modal.fields.iter().enumerate() {
        let focused = index == modal.focus_index;
        let style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        match field {
            Field::TextInput {
                label,
                value,
                placeholder,
                max_chars,
            } => {
                let mut spans = vec![Span::raw(format!("{label}: "))];
                if value.is_empty() {
                    spans.push(Span::styled(
                        placeholder.clone(),
                        style.fg(Color::DarkGray),
                    ));
                } else {
                    spans.push(Span::styled(value.clone(), style));
                }
                if focused {
                    spans.push(Span::raw("_"));
                }
                if let Some(max) = max_chars {
                    spans.push(Span::styled(
                        format!("  ({}/{max})", value.chars().count()),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                lines.push(Line::from(spans));
                lines.push(Line::from(""));
            }
            Field::Button { label, .. } => {
                lines.push(Line::from(Span::styled(format!("[{label}]"), style)));
            }
        }
    }

    if let Some(hint) = modal.hint.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

pub(in crate::tui) fn handle_modal_key(modal: &mut Modal, key: KeyCode) -> ModalAction {
    match key {
        KeyCode::Esc => ModalAction::Cancel,
        KeyCode::Tab | KeyCode::Down => {
            if !modal.fields.is_empty() {
                modal.focus_index = (modal.focus_index + 1) % modal.fields.len();
            }
            ModalAction::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            if !modal.fields.is_empty() {
                modal.focus_index =
                    (modal.focus_index + modal.fields.len() - 1) % modal.fields.len();
            }
            ModalAction::None
        }
        KeyCode::Backspace => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.pop();
            }
            ModalAction::None
        }
        KeyCode::Char(ch) => {
            if let Some(Field::TextInput {
                value, max_chars, ..
            }) = modal.fields.get_mut(modal.focus_index)
            {
                let full = max_chars.is_some_and(|max| value.chars().count() >= max);
                if !full {
                    value.push(ch);
                }
            }
            ModalAction::None
        }
        KeyCode::Enter => match modal.fields.get(modal.focus_index) {
            Some(Field::Button { action, .. }) => *action,
            Some(Field::TextInput { .. }) => {
                modal.focus_index = (modal.focus_index + 1) % modal.fields.len();
                ModalAction::None
            }
            None => ModalAction::None,
        },
        _ => ModalAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Modal {
        Modal {
            title: String::from("Sample"),
            focus_index: 0,
            fields: vec![
                Field::TextInput {
                    label: String::from("Name"),
                    value: String::new(),
                    placeholder: String::new(),
                    max_chars: Some(3),
                },
                Field::Button {
                    label: String::from("OK"),
                    action: ModalAction::Submit,
                },
            ],
            hint: None,
        }
    }

    fn value(modal: &Modal) -> &str {
        match &modal.fields[0] {
            Field::TextInput { value, .. } => value.as_str(),
            Field::Button { .. } => panic!("expected text input"),
        }
    }

    #[test]
    fn test_text_input_respects_max_chars() {
        let mut modal = sample();
        for ch in "abcd".chars() {
            handle_modal_key(&mut modal, KeyCode::Char(ch));
        }
        assert_eq!(value(&modal), "abc");
        handle_modal_key(&mut modal, KeyCode::Backspace);
        assert_eq!(value(&modal), "ab");
    }

    #[test]
    fn test_focus_wraps_and_enter_triggers_button() {
        let mut modal = sample();
        assert_eq!(handle_modal_key(&mut modal, KeyCode::Enter), ModalAction::None);
        assert_eq!(modal.focus_index, 1);
        assert_eq!(handle_modal_key(&mut modal, KeyCode::Enter), ModalAction::Submit);
        handle_modal_key(&mut modal, KeyCode::Tab);
        assert_eq!(modal.focus_index, 0);
        handle_modal_key(&mut modal, KeyCode::BackTab);
        assert_eq!(modal.focus_index, 1);
        assert_eq!(handle_modal_key(&mut modal, KeyCode::Esc), ModalAction::Cancel);
    }
}
