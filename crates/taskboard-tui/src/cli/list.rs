/*
[INPUT]:  TaskApi handle, list query
[OUTPUT]: Plain-text task table and status summary on stdout
[POS]:    CLI headless list view
[UPDATE]: When list columns or summary format change
*/

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use taskboard_client::{
    DateField, ListTasksQuery, SortDirection, SortField, Task, TaskApi, TaskStats, TaskStatus,
};
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use taskboard_tui::config::MAX_PAGE_SIZE;

const TITLE_WIDTH: usize = 40;
const STATUS_WIDTH: usize = 12;
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "snake_case")]
pub enum StatusArg {
    Open,
    InProgress,
    Done,
}

impl From<StatusArg> for TaskStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Open => TaskStatus::Open,
            StatusArg::InProgress => TaskStatus::InProgress,
            StatusArg::Done => TaskStatus::Done,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "snake_case")]
pub enum SortArg {
    CreatedAt,
    UpdatedAt,
    Status,
}

impl From<SortArg> for SortField {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::CreatedAt => SortField::CreatedAt,
            SortArg::UpdatedAt => SortField::UpdatedAt,
            SortArg::Status => SortField::Status,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "snake_case")]
pub enum DateFieldArg {
    CreatedAt,
    UpdatedAt,
}

impl From<DateFieldArg> for DateField {
    fn from(value: DateFieldArg) -> Self {
        match value {
            DateFieldArg::CreatedAt => DateField::CreatedAt,
            DateFieldArg::UpdatedAt => DateField::UpdatedAt,
        }
    }
}

/// Filters and ordering for `taskboard list`
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=MAX_PAGE_SIZE as i64))]
    pub limit: Option<u32>,
    #[arg(long, value_enum, default_value_t = SortArg::CreatedAt)]
    pub sort: SortArg,
    /// Ascending order (default is newest first)
    #[arg(long)]
    pub asc: bool,
    /// Timestamp that --since/--until apply to
    #[arg(long = "date-field", value_enum, default_value_t = DateFieldArg::CreatedAt)]
    pub date_field: DateFieldArg,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub since: Option<NaiveDate>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub until: Option<NaiveDate>,
}

impl ListArgs {
    /// Build the list query; `default_limit` applies when `--limit` is absent.
    pub fn query(&self, default_limit: u32) -> Result<ListTasksQuery> {
        if let (Some(since), Some(until)) = (self.since, self.until) {
            if since > until {
                bail!("--since {since} is after --until {until}");
            }
        }

        let direction = if self.asc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        let mut query = ListTasksQuery::newest_first(self.limit.unwrap_or(default_limit))
            .sorted_by(self.sort.into(), direction);
        if let Some(status) = self.status {
            query = query.with_status(status.into());
        }
        if self.since.is_some() || self.until.is_some() {
            query = query.within_dates(
                self.date_field.into(),
                self.since.map(|date| date.format(DATE_FORMAT).to_string()),
                self.until.map(|date| date.format(DATE_FORMAT).to_string()),
            );
        }
        Ok(query)
    }
}

pub async fn run_list(api: &dyn TaskApi, query: ListTasksQuery) -> Result<()> {
    debug!(?query, "listing tasks");
    let (tasks, stats) = tokio::try_join!(api.list_tasks(&query), api.task_stats())
        .context("failed to load tasks")?;
    print!("{}", render_plain(&tasks, &stats));
    Ok(())
}

/// Fixed-width table followed by `open=N, in_progress=N, done=N`
pub fn render_plain(tasks: &[Task], stats: &TaskStats) -> String {
    let mut out = String::new();
    if tasks.is_empty() {
        out.push_str("No tasks\n");
    } else {
        out.push_str(&format!(
            "{}  {}  CREATED\n",
            pad("STATUS", STATUS_WIDTH),
            pad("TITLE", TITLE_WIDTH)
        ));
        for task in tasks {
            out.push_str(&format!(
                "{}  {}  {}\n",
                pad(task.status.as_str(), STATUS_WIDTH),
                pad(&truncate(&task.title, TITLE_WIDTH), TITLE_WIDTH),
                task.created_at
            ));
        }
    }

    let summary = TaskStatus::ORDER
        .iter()
        .map(|status| format!("{}={}", status.as_str(), stats.count(status)))
        .collect::<Vec<_>>()
        .join(", ");
    out.push('\n');
    out.push_str(&summary);
    out.push('\n');
    out
}

/// Cut to `width` display columns, marking the cut with an ellipsis
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct ListCommand {
        #[command(flatten)]
        args: ListArgs,
    }

    fn parse(argv: &[&str]) -> std::result::Result<ListArgs, clap::Error> {
        ListCommand::try_parse_from(std::iter::once("list").chain(argv.iter().copied()))
            .map(|command| command.args)
    }

    #[test]
    fn test_defaults_to_newest_first_with_config_limit() {
        let query = parse(&[]).expect("parse").query(25).expect("query");
        assert_eq!(query, ListTasksQuery::newest_first(25));
    }

    #[test]
    fn test_status_typo_is_rejected_locally() {
        let err = parse(&["--status", "in-progres"]).expect_err("unknown status");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);

        let args = parse(&["--status", "in_progress"]).expect("parse");
        let query = args.query(50).expect("query");
        assert_eq!(query.status, Some(TaskStatus::InProgress));
    }

    #[test]
    fn test_date_window_and_sort_flags() {
        let args = parse(&[
            "--sort",
            "status",
            "--asc",
            "--date-field",
            "updated_at",
            "--since",
            "2024-01-01",
            "--until",
            "2024-01-31",
        ])
        .expect("parse");
        let query = args.query(50).expect("query");
        assert_eq!(query.sort, SortField::Status);
        assert_eq!(query.direction, SortDirection::Asc);
        assert_eq!(query.date_field_filter, Some(DateField::UpdatedAt));
        assert_eq!(query.since.as_deref(), Some("2024-01-01"));
        assert_eq!(query.until.as_deref(), Some("2024-01-31"));
    }

    #[test]
    fn test_date_window_is_validated() {
        assert!(parse(&["--since", "2024-13-01"]).is_err());

        let args = parse(&["--since", "2024-02-01", "--until", "2024-01-01"]).expect("parse");
        assert!(args.query(50).is_err());

        let args = parse(&["--until", "2024-01-01"]).expect("parse");
        let query = args.query(50).expect("query");
        assert_eq!(query.date_field_filter, Some(DateField::CreatedAt));
        assert_eq!(query.since, None);
    }

    fn task(title: &str, status: TaskStatus) -> Task {
        Task {
            id: "task-1".to_string(),
            title: title.to_string(),
            description: None,
            status,
            created_at: "2026-03-01T09:30:00Z".to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn test_summary_defaults_to_zero() {
        let stats: TaskStats = [("open".to_string(), 2)].into_iter().collect();
        let out = render_plain(&[], &stats);
        assert!(out.starts_with("No tasks\n"));
        assert!(out.ends_with("open=2, in_progress=0, done=0\n"));
    }

    #[test]
    fn test_rows_include_unknown_status() {
        let tasks = vec![task("Triage", TaskStatus::Other("blocked".to_string()))];
        let out = render_plain(&tasks, &TaskStats::default());
        let row = out.lines().nth(1).expect("row");
        assert!(row.starts_with("blocked "));
        assert!(row.contains("Triage"));
        assert!(row.ends_with("2026-03-01T09:30:00Z"));
    }

    #[test]
    fn test_truncate_respects_display_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        // wide glyphs take two columns each
        assert_eq!(truncate("日本語テキスト", 7), "日本語…");
        assert_eq!(pad("日本", 6).width(), 6);
    }
}
