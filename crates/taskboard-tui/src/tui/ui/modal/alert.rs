/*
[INPUT]:  Alert raised by a failed mutation
[OUTPUT]: Blocking alert popup and its dismiss keys
[POS]:    TUI UI modal alert
[UPDATE]: When alert wording or dismiss keys change
*/

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::board::Alert;

pub(in crate::tui) fn is_dismiss_key(key: KeyCode) -> bool {
    matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
}

pub(in crate::tui) fn draw_alert(frame: &mut ratatui::Frame, area: Rect, alert: &Alert) {
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::raw(alert.message.clone())),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] OK",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )
        .title(alert.title.as_str());
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}
