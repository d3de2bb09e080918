/*
[INPUT]:  TaskApi handle, AppConfig, log buffer, terminal input events
[OUTPUT]: Ratatui-based TUI run loop, rendering, and log buffer utilities
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
[UPDATE]: Spawn refreshes and mutations so the loading state is drawn while they run
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use taskboard_client::{TaskApi, TaskboardError};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::fmt::MakeWriter;

use super::app::{ActiveModal, AppState};
use super::events::{KeyOutcome, handle_key_event};
use super::terminal::TerminalGuard;
use super::ui::modal::{draw_alert, draw_confirm_delete, draw_modal};
use super::ui::*;
use crate::board::{Alert, BoardController, BoardSnapshot, Mutation, MutationKind, RefreshTicket};
use crate::config::AppConfig;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub const LOG_BUFFER_CAPACITY: usize = 2000;

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    /// Last `count` lines, oldest first
    pub fn tail(&self, count: usize) -> Vec<String> {
        let start = self.lines.len().saturating_sub(count);
        self.lines.iter().skip(start).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl LogWriter {
    fn push(&self, line: String) {
        let mut guard = match self.buffer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push_line(line);
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let chunk = String::from_utf8_lossy(buf);
        self.partial.push_str(&chunk);
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial = self.partial[pos + 1..].to_string();
            self.push(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            self.push(line);
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

enum UiEvent {
    Input(CrosstermEvent),
    Refreshed {
        ticket: RefreshTicket,
        result: Result<BoardSnapshot, TaskboardError>,
    },
    Mutated {
        kind: MutationKind,
        result: Result<(), Alert>,
    },
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let line1 = Line::from(vec![
        Span::styled("[Up/Down]", key_style),
        Span::raw(" Select  "),
        Span::styled("[Left/Right]", key_style),
        Span::raw(" Status  "),
        Span::styled("[n]", key_style),
        Span::raw(" New  "),
        Span::styled("[x]", key_style),
        Span::raw(" Delete"),
    ]);
    let line2 = Line::from(vec![
        Span::styled("[r]", key_style),
        Span::raw(" Refresh  "),
        Span::styled("[l]", key_style),
        Span::raw(" Logs  "),
        Span::styled("[q]", key_style),
        Span::raw(" Quit  "),
        Span::raw(format!("Status: {}", app.status_message)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let text = Text::from(vec![line1, line2]);
    let widget = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub async fn run_tui_with_log(
    api: Arc<dyn TaskApi>,
    config: &AppConfig,
    log_buffer: LogBufferHandle,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();
    let input_tx = event_tx.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    let _ = input_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let board = BoardController::new(api, config.page_size);
    let mut app = AppState::new(board, log_buffer, config.api_base.clone());
    info!(api_base = %config.api_base, "taskboard started");
    spawn_refresh(&mut app, &event_tx);

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = tick.tick() => {}
            maybe_event = event_rx.recv() => {
                let Some(event) = maybe_event else {
                    break;
                };
                match event {
                    UiEvent::Input(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        match handle_key_event(&mut app, key) {
                            KeyOutcome::Continue => {}
                            KeyOutcome::Quit => should_quit = true,
                            KeyOutcome::Refresh => spawn_refresh(&mut app, &event_tx),
                            KeyOutcome::Mutate(mutation) => {
                                spawn_mutation(&mut app, mutation, &event_tx)
                            }
                        }
                    }
                    UiEvent::Input(_) => {}
                    UiEvent::Refreshed { ticket, result } => app.on_refreshed(ticket, result),
                    UiEvent::Mutated { kind, result } => {
                        if app.on_mutated(kind, result) {
                            spawn_refresh(&mut app, &event_tx);
                        }
                    }
                }
            }
        }

        terminal.draw(|frame| draw_ui(frame, &mut app))?;
    }

    input_shutdown.cancel();
    info!("taskboard stopped");
    Ok(())
}

fn spawn_refresh(app: &mut AppState, event_tx: &mpsc::UnboundedSender<UiEvent>) {
    let ticket = app.board.begin_refresh();
    let refresh = app.board.refresh_future();
    let event_tx = event_tx.clone();
    debug!(?ticket, "refresh started");
    tokio::spawn(async move {
        let result = refresh.await;
        let _ = event_tx.send(UiEvent::Refreshed { ticket, result });
    });
}

fn spawn_mutation(
    app: &mut AppState,
    mutation: Mutation,
    event_tx: &mpsc::UnboundedSender<UiEvent>,
) {
    app.begin_mutation();
    let api = app.board.api();
    let event_tx = event_tx.clone();
    tokio::spawn(async move {
        let kind = mutation.kind();
        let result = mutation.execute(api.as_ref()).await;
        let _ = event_tx.send(UiEvent::Mutated { kind, result });
    });
}

fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let area = frame.area();
    let header_height = if app.board.state().error.is_some() { 4 } else { 3 };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(4),
        ])
        .split(area);

    draw_header(
        frame,
        layout[0],
        app.board.state(),
        &app.api_base,
        app.is_busy(),
    );
    draw_summary(frame, layout[1], &app.board.state().stats);

    if app.show_logs {
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(layout[2]);
        draw_task_list(frame, body[0], app.board.state(), &mut app.table_state);
        draw_logs(frame, body[1], &app.log_buffer);
    } else {
        draw_task_list(frame, layout[2], app.board.state(), &mut app.table_state);
    }

    draw_footer(frame, layout[3], app);

    match app.active_modal.as_ref() {
        Some(ActiveModal::CreateTask(form)) => {
            let modal = form.to_modal(app.is_busy());
            draw_modal(frame, centered_rect(area, 60, 60), &modal);
        }
        Some(ActiveModal::ConfirmDelete(pending)) => {
            draw_confirm_delete(frame, centered_rect(area, 50, 30), pending);
        }
        None => {}
    }

    if let Some(alert) = app.alert.as_ref() {
        draw_alert(frame, centered_rect(area, 50, 30), alert);
    }
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
