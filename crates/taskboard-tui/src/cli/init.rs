/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When AppConfig schema changes
*/

use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::path::PathBuf;

use taskboard_tui::config::{AppConfig, MAX_PAGE_SIZE};

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to Taskboard Init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a new board configuration.").dim()
    );

    let theme = ColorfulTheme::default();
    let defaults = AppConfig::default();

    if output.exists() {
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(format!("{} exists. Overwrite?", output.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("{}", style("Aborted; nothing written.").yellow());
            return Ok(());
        }
    }

    println!("\n{}", style("--- Task Service ---").bold());
    let api_base: String = Input::with_theme(&theme)
        .with_prompt("API base URL")
        .default(defaults.api_base.clone())
        .interact_text()?;

    println!("\n{}", style("--- Board ---").bold());
    let page_size: u32 = Input::with_theme(&theme)
        .with_prompt(format!("Tasks per page (1-{MAX_PAGE_SIZE})"))
        .default(defaults.page_size)
        .validate_with(|value: &u32| -> std::result::Result<(), String> {
            if (1..=MAX_PAGE_SIZE).contains(value) {
                Ok(())
            } else {
                Err(format!("must be between 1 and {MAX_PAGE_SIZE}"))
            }
        })
        .interact_text()?;

    let request_timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Request timeout (seconds)")
        .default(defaults.request_timeout_secs)
        .interact_text()?;

    let config = AppConfig {
        api_base,
        page_size,
        request_timeout_secs,
        connect_timeout_secs: defaults.connect_timeout_secs,
    };
    if let Err(err) = config.validate() {
        bail!("invalid configuration: {err}");
    }

    let yaml = config.to_yaml()?;
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&output, yaml)
        .with_context(|| format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}
