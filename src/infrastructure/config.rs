// src/infrastructure/config.rs
use crate::constants::{
    DEFAULT_CARDS_PER_ROW, DEFAULT_COMPILER, DEFAULT_COMPILE_TIMEOUT_SECS, DEFAULT_FALSE_LABEL,
    DEFAULT_TRUE_LABEL,
};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// TOML configuration for deck generation
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
    #[serde(default)]
    pub compiler: CompilerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RenderConfig {
    #[serde(default)]
    pub include_curiosity: bool,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    #[serde(default = "default_cards_per_row")]
    pub cards_per_row: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LabelsConfig {
    #[serde(default = "default_true_label")]
    pub true_label: String,
    #[serde(default = "default_false_label")]
    pub false_label: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CompilerConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

// Default value functions
fn default_shuffle() -> bool { true }
fn default_cards_per_row() -> usize { DEFAULT_CARDS_PER_ROW }
fn default_true_label() -> String { DEFAULT_TRUE_LABEL.to_string() }
fn default_false_label() -> String { DEFAULT_FALSE_LABEL.to_string() }
fn default_program() -> String { DEFAULT_COMPILER.to_string() }
fn default_timeout_secs() -> u64 { DEFAULT_COMPILE_TIMEOUT_SECS }

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            include_curiosity: false,
            shuffle: default_shuffle(),
            cards_per_row: default_cards_per_row(),
            seed: None,
        }
    }
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            true_label: default_true_label(),
            false_label: default_false_label(),
        }
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CompilerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Use `explicit` if given, else the per-user config file if present, else defaults.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(?path, "Loading config from command line");
            return Self::load(path);
        }

        match Self::user_config_path() {
            Some(path) if path.is_file() => {
                debug!(?path, "Loading user config");
                Self::load(path)
            }
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `<config dir>/quizdeck/config.toml`, e.g. `~/.config/quizdeck/config.toml` on Linux.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quizdeck").join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.render.cards_per_row == 0 {
            bail!("render.cards_per_row must be at least 1");
        }
        if self.compiler.timeout_secs == 0 {
            bail!("compiler.timeout_secs must be at least 1");
        }
        if self.compiler.program.trim().is_empty() {
            bail!("compiler.program must not be empty");
        }
        Ok(())
    }
}
