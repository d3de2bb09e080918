/*
[INPUT]:  TaskApi handle, AppConfig, and log buffer
[OUTPUT]: Ratatui-based task board with form, table, summary, and logs
[POS]:    TUI module for the taskboard binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use runtime::{
    LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriter, LogWriterFactory,
    run_tui_with_log,
};
