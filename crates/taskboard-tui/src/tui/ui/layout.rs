/*
[INPUT]:  BoardState sync status, in-flight flag, and API base URL
[OUTPUT]: Header bar with sync indicator and inline refresh error
[POS]:    TUI UI header layout
[UPDATE]: When header contents or error placement change
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::board::BoardState;
use crate::tui::runtime::{border_style, header_style};

pub(in crate::tui) fn draw_header(
    frame: &mut ratatui::Frame,
    area: Rect,
    state: &BoardState,
    api_base: &str,
    busy: bool,
) {
    let sync = if busy || state.loading {
        Span::styled("syncing…", Style::default().fg(Color::Yellow))
    } else {
        match state.last_synced {
            Some(at) => Span::styled(
                format!("synced {}", at.format("%H:%M:%S")),
                Style::default().fg(Color::LightGreen),
            ),
            None => Span::styled("not synced", Style::default().fg(Color::DarkGray)),
        }
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(" Taskboard ", header_style()),
        Span::raw("  "),
        sync,
        Span::raw("  "),
        Span::styled(api_base.to_string(), Style::default().fg(Color::DarkGray)),
    ])];
    if let Some(error) = state.error.as_deref() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style()),
    );
    frame.render_widget(widget, area);
}
