//! Configuration file handling
//!
//! Optional TOML file; every key has a default. Command-line arguments take
//! precedence over anything set here.

use anyhow::{Context, Result};
use inwatch_core::batch::DEFAULT_BATCH_EVENTS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest accepted `watch.buffer_events`
pub const MAX_BUFFER_EVENTS: usize = 65536;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub watch: WatchConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Initial batch capacity, in maximum-size records
    pub buffer_events: usize,
    /// Mask specification used when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_mask: Option<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            buffer_events: DEFAULT_BATCH_EVENTS,
            default_mask: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Request new RLIMIT_NOFILE limits at startup
    pub raise_nofile: bool,
    pub nofile_soft: u64,
    pub nofile_hard: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            raise_nofile: true,
            nofile_soft: 3072,
            nofile_hard: 8172,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_BUFFER_EVENTS).contains(&self.watch.buffer_events) {
            anyhow::bail!(
                "watch.buffer_events must be between 1 and {}, got {}",
                MAX_BUFFER_EVENTS,
                self.watch.buffer_events
            );
        }

        if self.limits.nofile_soft > self.limits.nofile_hard {
            anyhow::bail!(
                "limits.nofile_soft ({}) exceeds limits.nofile_hard ({})",
                self.limits.nofile_soft,
                self.limits.nofile_hard
            );
        }

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Default config file location: `<config dir>/inwatch/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("inwatch").join("config.toml"))
}

/// Load configuration
///
/// An explicit path must exist. Without one, the default location is used
/// if present, otherwise built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_from(path),
        None => match config_file_path() {
            Some(path) if path.exists() => load_from(&path),
            _ => Ok(Config::default()),
        },
    }
}

pub fn load_from(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    Ok(config)
}
