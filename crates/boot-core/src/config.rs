use crate::command::CommandSpec;
use crate::supervisor::RetrySchedule;
use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_BASE_WAIT_SECONDS: u64 = 10;
pub const DEFAULT_WAIT_INCREMENT_SECONDS: u64 = 5;

pub const ENV_MAX_ATTEMPTS: &str = "BOOT_MAX_ATTEMPTS";
pub const ENV_BASE_WAIT_SECONDS: &str = "BOOT_BASE_WAIT_SECONDS";
pub const ENV_WAIT_INCREMENT_SECONDS: &str = "BOOT_WAIT_INCREMENT_SECONDS";

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SupervisorConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_wait_seconds")]
    pub base_wait_seconds: u64,
    #[serde(default = "default_wait_increment_seconds")]
    pub wait_increment_seconds: u64,
    #[serde(default)]
    pub precondition: Option<CommandSpec>,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_wait_seconds: DEFAULT_BASE_WAIT_SECONDS,
            wait_increment_seconds: DEFAULT_WAIT_INCREMENT_SECONDS,
            precondition: None,
        }
    }
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_base_wait_seconds() -> u64 {
    DEFAULT_BASE_WAIT_SECONDS
}

fn default_wait_increment_seconds() -> u64 {
    DEFAULT_WAIT_INCREMENT_SECONDS
}

impl SupervisorConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path).context("read config")?;
        let config = serde_json::from_str(&data).context("parse config")?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("create config directory")?;
        }
        let data = serde_json::to_string_pretty(self).context("serialize config")?;
        fs::write(path, data).context("write config")?;
        Ok(())
    }

    /// Applies tunable overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_MAX_ATTEMPTS) {
            self.max_attempts = parse_override(ENV_MAX_ATTEMPTS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_BASE_WAIT_SECONDS) {
            self.base_wait_seconds = parse_override(ENV_BASE_WAIT_SECONDS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_WAIT_INCREMENT_SECONDS) {
            self.wait_increment_seconds = parse_override(ENV_WAIT_INCREMENT_SECONDS, &raw)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_attempts == 0 {
            anyhow::bail!("max_attempts must be at least 1");
        }
        if self.base_wait_seconds == 0 {
            anyhow::bail!("base_wait_seconds must be at least 1");
        }
        Ok(())
    }

    pub fn schedule(&self) -> RetrySchedule {
        RetrySchedule {
            max_attempts: self.max_attempts,
            base_wait_seconds: self.base_wait_seconds,
            wait_increment_seconds: self.wait_increment_seconds,
        }
    }
}

fn parse_override<T>(name: &str, raw: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("parse {name}={raw}"))
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let project = ProjectDirs::from("com", "boot-supervisor", "boot-supervisor")
        .context("resolve project dirs")?;
    Ok(project.config_dir().join("config.json"))
}
