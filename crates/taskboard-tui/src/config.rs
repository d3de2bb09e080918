/*
[INPUT]:  YAML configuration file, TASKBOARD_API_BASE, CLI overrides
[OUTPUT]: Validated application configuration
[POS]:    Configuration layer - service endpoint and board settings
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use taskboard_client::{BASE_URL_ENV, ClientConfig, DEFAULT_BASE_URL};

/// Largest page the task service will return
pub const MAX_PAGE_SIZE: u32 = 100;

/// Top-level configuration for the task board
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Base URL of the task service
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Number of newest tasks shown on the board
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    50
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    /// `<config_dir>/taskboard/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taskboard").join("config.yaml"))
    }

    /// Resolve the file layer: an explicit path must exist, the default path may not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`)
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_base) = lookup(BASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.api_base = api_base;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            bail!("api_base must not be empty");
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            bail!("page_size must be between 1 and {MAX_PAGE_SIZE}");
        }
        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            bail!("timeouts must be positive");
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("serialize config to YAML")
    }
}
