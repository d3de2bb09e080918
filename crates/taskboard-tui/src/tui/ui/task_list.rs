/*
[INPUT]:  BoardState tasks/loading flag, selected row, and key events
[OUTPUT]: Task table rendered into Ratatui frame and typed row actions
[POS]:    TUI UI task list rendering
[UPDATE]: When task columns, row keys, or empty/loading states change
*/

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use taskboard_client::{Task, TaskStatus};

use crate::board::{BoardState, PendingDelete};
use crate::status::{cycle_status, status_info};
use crate::tui::runtime::{border_style, header_style};

const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// What a key press on a row asks the board to do
#[derive(Debug, Clone, PartialEq)]
pub(in crate::tui) enum ListAction {
    ChangeStatus { id: String, status: TaskStatus },
    RequestDelete(PendingDelete),
}

/// Left/Right step the status immediately; x/Delete only request a delete.
pub(in crate::tui) fn list_action(task: &Task, key: KeyCode) -> Option<ListAction> {
    match key {
        KeyCode::Left | KeyCode::Right => {
            let status = cycle_status(&task.status, key == KeyCode::Right);
            if status == task.status {
                return None;
            }
            Some(ListAction::ChangeStatus {
                id: task.id.clone(),
                status,
            })
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            Some(ListAction::RequestDelete(PendingDelete::request(task)))
        }
        _ => None,
    }
}

pub(in crate::tui) fn draw_task_list(
    frame: &mut ratatui::Frame,
    area: Rect,
    state: &BoardState,
    table_state: &mut TableState,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(format!("Tasks ({})", state.tasks.len()));

    if state.loading || state.tasks.is_empty() {
        let text = if state.loading { "Loading…" } else { "No tasks" };
        let widget = Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(widget, area);
        return;
    }

    let header = Row::new(vec!["Title", "Description", "Status", "Created"]).style(header_style());
    let rows = state.tasks.iter().map(|task| {
        let info = status_info(&task.status);
        Row::new(vec![
            Cell::from(task.title.clone()),
            Cell::from(description_cell(task)),
            Cell::from(Span::styled(info.label, Style::default().fg(info.color))),
            Cell::from(format_created(&task.created_at, &Local)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(24),
            Constraint::Percentage(40),
            Constraint::Percentage(16),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");
    frame.render_stateful_widget(table, area, table_state);
}

fn description_cell(task: &Task) -> String {
    match task.description.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.replace(['\n', '\r'], " "),
        _ => String::from("-"),
    }
}

/// Render a server timestamp in `tz`; anything unparseable is shown as sent.
pub(in crate::tui) fn format_created<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(tz).format(CREATED_FORMAT).to_string();
    }
    // naive timestamps are UTC on the wire
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive
            .and_utc()
            .with_timezone(tz)
            .format(CREATED_FORMAT)
            .to_string();
    }
    raw.to_string()
}
