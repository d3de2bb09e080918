/*
[INPUT]:  TaskStats counts by status
[OUTPUT]: Task overview panel rendered into Ratatui frame
[POS]:    TUI UI summary panel rendering
[UPDATE]: When the overview layout or status order changes
*/

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use taskboard_client::{TaskStats, TaskStatus};

use crate::status::status_info;
use crate::tui::runtime::border_style;

/// One entry per known status in display order; missing counts read as zero
pub(in crate::tui) fn summary_entries(stats: &TaskStats) -> Vec<(TaskStatus, u64)> {
    TaskStatus::ORDER
        .iter()
        .map(|status| (status.clone(), stats.count(status)))
        .collect()
}

pub(in crate::tui) fn draw_summary(frame: &mut ratatui::Frame, area: Rect, stats: &TaskStats) {
    let mut spans = Vec::new();
    for (index, (status, count)) in summary_entries(stats).into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("   "));
        }
        let info = status_info(&status);
        spans.push(Span::styled(
            format!("{}: ", info.label),
            Style::default().fg(info.color),
        ));
        spans.push(Span::styled(
            count.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Task Overview"),
    );
    frame.render_widget(widget, area);
}
