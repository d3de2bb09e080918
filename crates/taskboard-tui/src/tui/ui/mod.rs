/*
[INPUT]:  Board state, app state, and log buffer for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When adding panels or changing panel exports
*/

mod layout;
mod logs;
mod summary;
mod task_list;

pub mod modal;

pub(in crate::tui) use layout::draw_header;
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use summary::draw_summary;
pub(in crate::tui) use task_list::{ListAction, draw_task_list, list_action};

#[cfg(test)]
pub(in crate::tui) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let mut out = String::new();
    for y in 0..buffer.area.height {
        let mut line = String::new();
        for x in 0..buffer.area.width {
            let symbol = buffer.cell((x, y)).map(|cell| cell.symbol()).unwrap_or(" ");
            line.push_str(symbol);
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
