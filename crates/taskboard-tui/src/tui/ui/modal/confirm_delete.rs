/*
[INPUT]:  PendingDelete target and key events
[OUTPUT]: Delete confirmation dialog and confirm/cancel decisions
[POS]:    TUI UI modal delete confirmation
[UPDATE]: When the delete confirmation keys or wording change
*/

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::board::PendingDelete;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::tui) enum ConfirmAction {
    Confirm,
    Cancel,
    None,
}

pub(in crate::tui) fn handle_confirm_key(key: KeyCode) -> ConfirmAction {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') => ConfirmAction::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => ConfirmAction::Cancel,
        _ => ConfirmAction::None,
    }
}

pub(in crate::tui) fn draw_confirm_delete(
    frame: &mut ratatui::Frame,
    area: Rect,
    pending: &PendingDelete,
) {
    frame.render_widget(Clear, area);

    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Delete task "),
            Span::styled(
                format!("\"{}\"", pending.title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("?"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", key_style),
            Span::raw(" Delete  "),
            Span::styled("[n/Esc]", key_style),
            Span::raw(" Keep"),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightRed))
        .title("Confirm Delete");
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}
