/*
[INPUT]:  CLI arguments, YAML configuration file, TASKBOARD_API_BASE
[OUTPUT]: Terminal task board, or headless init/list subcommands
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or log routing
*/

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

use taskboard_client::{TaskApi, TaskboardClient};
use taskboard_tui::AppConfig;
use taskboard_tui::tui::{LOG_BUFFER_CAPACITY, LogBuffer, LogWriterFactory, run_tui_with_log};

#[derive(Parser, Debug)]
#[command(name = "taskboard", version, about = "Terminal task board for the task service")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    /// Overrides the config file and TASKBOARD_API_BASE
    #[arg(long = "api-base", value_name = "URL", global = true)]
    api_base: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    /// Also write TUI logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactively write a configuration file
    Init {
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Print tasks and the status summary without the TUI
    List(cli::list::ListArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        config_path,
        api_base,
        log_level,
        log_file,
        command,
    } = Cli::parse();

    match command {
        Some(Command::Init { output }) => {
            init_stderr_tracing(&log_level)?;
            let output = match output.or(config_path) {
                Some(path) => path,
                None => AppConfig::default_path()
                    .context("no config directory on this platform; pass --output")?,
            };
            cli::init::run_init(output)
        }
        Some(Command::List(args)) => {
            init_stderr_tracing(&log_level)?;
            let config = resolve_config(config_path.as_deref(), api_base)?;
            let client = build_client(&config)?;
            let query = args.query(config.page_size)?;
            cli::list::run_list(&client, query).await
        }
        None => {
            let log_buffer = Arc::new(Mutex::new(LogBuffer::new(LOG_BUFFER_CAPACITY)));
            let _guard = init_tui_tracing(&log_level, log_buffer.clone(), log_file.as_deref())?;
            let config = resolve_config(config_path.as_deref(), api_base)?;
            let client: Arc<dyn TaskApi> = Arc::new(build_client(&config)?);
            info!(api_base = %config.api_base, page_size = config.page_size, "configuration loaded");
            run_tui_with_log(client, &config, log_buffer).await
        }
    }
}

/// File, then environment, then flag; later layers win
fn resolve_config(path: Option<&Path>, api_base: Option<String>) -> Result<AppConfig> {
    let mut config = AppConfig::load(path).context("load config")?;
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(api_base) = api_base {
        config.api_base = api_base;
    }
    config.validate().context("validate config")?;
    Ok(config)
}

fn build_client(config: &AppConfig) -> Result<TaskboardClient> {
    TaskboardClient::with_config_and_base_url(config.client_config(), &config.api_base)
        .context("create task service client")
}

fn env_filter(log_level: &str) -> Result<EnvFilter> {
    match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => {
            EnvFilter::try_new(directives).context("invalid RUST_LOG")
        }
        _ => EnvFilter::try_new(log_level).context("invalid log level"),
    }
}

fn init_stderr_tracing(log_level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_level)?)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn init_tui_tracing(
    log_level: &str,
    log_buffer: taskboard_tui::tui::LogBufferHandle,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let buffer_writer = LogWriterFactory::new(log_buffer);
    let (writer, guard) = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .context("log file path must name a file")?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (file_writer, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(buffer_writer.and(file_writer)), Some(guard))
        }
        None => (BoxMakeWriter::new(buffer_writer), None),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_level)?)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}
