/*
[INPUT]:  TaskStatus values from the task service
[OUTPUT]: Display label, colour, and display-order helpers per status
[POS]:    Presentation utility shared by every view
[UPDATE]: When the status set or its palette changes
*/

use ratatui::style::Color;
use taskboard_client::TaskStatus;

pub const OPEN_COLOR: Color = Color::Rgb(0x3b, 0x82, 0xf6);
pub const IN_PROGRESS_COLOR: Color = Color::Rgb(0xf5, 0x9e, 0x0b);
pub const DONE_COLOR: Color = Color::Rgb(0x22, 0xc5, 0x5e);
/// Neutral grey for statuses outside the known set
pub const FALLBACK_COLOR: Color = Color::Rgb(0x6b, 0x72, 0x80);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub label: String,
    pub color: Color,
}

/// Label and colour for a status; unknown values fall back to the raw string in grey.
pub fn status_info(status: &TaskStatus) -> StatusInfo {
    let (label, color) = match status {
        TaskStatus::Open => ("Open", OPEN_COLOR),
        TaskStatus::InProgress => ("In Progress", IN_PROGRESS_COLOR),
        TaskStatus::Done => ("Done", DONE_COLOR),
        TaskStatus::Other(raw) => {
            return StatusInfo {
                label: raw.clone(),
                color: FALLBACK_COLOR,
            };
        }
    };
    StatusInfo {
        label: label.to_string(),
        color,
    }
}

/// Step through the display order, wrapping at both ends.
///
/// An unknown status steps onto the first (forward) or last (backward) known one.
pub fn cycle_status(current: &TaskStatus, forward: bool) -> TaskStatus {
    let order = &TaskStatus::ORDER;
    let next = match order.iter().position(|status| status == current) {
        Some(index) if forward => (index + 1) % order.len(),
        Some(index) => (index + order.len() - 1) % order.len(),
        None if forward => 0,
        None => order.len() - 1,
    };
    order[next].clone()
}
