//! Configuration file loading with precedence handling.

use crate::model::Breakpoints;
use crate::state::{ContainerOptions, PullConfig};
use crate::view_state::{CellMetrics, ViewKind};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A resolved value is out of range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending setting.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/pullpane/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Attach pull-to-refresh listeners.
    #[serde(default)]
    pub enable_pull_to_refresh: Option<bool>,

    /// Maximum rendered pull offset in px.
    #[serde(default)]
    pub max_pull: Option<f64>,

    /// Pull distance at release that triggers a refresh, in px.
    #[serde(default)]
    pub refresh_threshold: Option<f64>,

    /// Smallest tablet width in px.
    #[serde(default)]
    pub tablet_breakpoint: Option<u32>,

    /// Smallest desktop width in px.
    #[serde(default)]
    pub desktop_breakpoint: Option<u32>,

    /// Width of one terminal cell in px.
    #[serde(default)]
    pub cell_width_px: Option<u32>,

    /// Height of one terminal cell in px.
    #[serde(default)]
    pub cell_height_px: Option<u32>,

    /// Simulated refresh latency for the demo.
    #[serde(default)]
    pub refresh_delay_ms: Option<u64>,

    /// Initial content view (`grid`, `list`, `split`).
    #[serde(default)]
    pub view: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Pull-to-refresh enabled.
    pub enable_pull_to_refresh: bool,
    /// Maximum pull in px.
    pub max_pull: f64,
    /// Refresh threshold in px.
    pub refresh_threshold: f64,
    /// Tablet breakpoint in px.
    pub tablet_breakpoint: u32,
    /// Desktop breakpoint in px.
    pub desktop_breakpoint: u32,
    /// Cell width in px.
    pub cell_width_px: u32,
    /// Cell height in px.
    pub cell_height_px: u32,
    /// Demo refresh latency in ms.
    pub refresh_delay_ms: u64,
    /// Initial view name.
    pub view: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            enable_pull_to_refresh: true,
            max_pull: PullConfig::DEFAULT.max_pull(),
            refresh_threshold: PullConfig::DEFAULT.refresh_threshold(),
            tablet_breakpoint: Breakpoints::DEFAULT.tablet(),
            desktop_breakpoint: Breakpoints::DEFAULT.desktop(),
            cell_width_px: CellMetrics::DEFAULT.width_px(),
            cell_height_px: CellMetrics::DEFAULT.height_px(),
            refresh_delay_ms: 1200,
            view: ViewKind::default().as_str().to_string(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Validated container options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unreachable thresholds or
    /// out-of-order breakpoints.
    pub fn container_options(&self) -> Result<ContainerOptions, ConfigError> {
        let pull = PullConfig::new(self.max_pull, self.refresh_threshold).map_err(|e| {
            ConfigError::InvalidValue {
                field: "refresh_threshold",
                reason: e.to_string(),
            }
        })?;
        let breakpoints = Breakpoints::new(self.tablet_breakpoint, self.desktop_breakpoint)
            .map_err(|e| ConfigError::InvalidValue {
                field: "tablet_breakpoint",
                reason: e.to_string(),
            })?;

        Ok(ContainerOptions {
            enable_pull_to_refresh: self.enable_pull_to_refresh,
            pull,
            breakpoints,
        })
    }

    /// Validated cell metrics.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for zero-sized cells.
    pub fn cell_metrics(&self) -> Result<CellMetrics, ConfigError> {
        CellMetrics::new(self.cell_width_px, self.cell_height_px).map_err(|e| {
            ConfigError::InvalidValue {
                field: "cell_width_px",
                reason: e.to_string(),
            }
        })
    }

    /// Parsed initial view.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unknown view name.
    pub fn view_kind(&self) -> Result<ViewKind, ConfigError> {
        self.view.parse().map_err(|e: crate::view_state::UnknownViewKind| {
            ConfigError::InvalidValue {
                field: "view",
                reason: e.to_string(),
            }
        })
    }

    /// Demo refresh latency.
    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/pullpane/pullpane.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("pullpane").join("pullpane.log")
    } else {
        PathBuf::from("pullpane.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/pullpane/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pullpane").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PULLPANE_CONFIG` environment variable
/// 3. Default path `~/.config/pullpane/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("PULLPANE_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        enable_pull_to_refresh: config
            .enable_pull_to_refresh
            .unwrap_or(defaults.enable_pull_to_refresh),
        max_pull: config.max_pull.unwrap_or(defaults.max_pull),
        refresh_threshold: config
            .refresh_threshold
            .unwrap_or(defaults.refresh_threshold),
        tablet_breakpoint: config
            .tablet_breakpoint
            .unwrap_or(defaults.tablet_breakpoint),
        desktop_breakpoint: config
            .desktop_breakpoint
            .unwrap_or(defaults.desktop_breakpoint),
        cell_width_px: config.cell_width_px.unwrap_or(defaults.cell_width_px),
        cell_height_px: config.cell_height_px.unwrap_or(defaults.cell_height_px),
        refresh_delay_ms: config.refresh_delay_ms.unwrap_or(defaults.refresh_delay_ms),
        view: config.view.unwrap_or(defaults.view),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides from the process environment.
///
/// Checks for:
/// - `PULLPANE_PULL_TO_REFRESH`: `1/true/yes/on` or `0/false/no/off`
/// - `PULLPANE_REFRESH_DELAY_MS`: refresh latency in ms
pub fn apply_env_overrides(config: ResolvedConfig) -> ResolvedConfig {
    apply_env_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply environment overrides read through `lookup`.
///
/// Unparseable values are logged and ignored.
pub fn apply_env_overrides_from(
    mut config: ResolvedConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    if let Some(raw) = lookup("PULLPANE_PULL_TO_REFRESH") {
        match parse_flag(&raw) {
            Some(enabled) => config.enable_pull_to_refresh = enabled,
            None => warn!(value = %raw, "ignoring unrecognized PULLPANE_PULL_TO_REFRESH"),
        }
    }

    if let Some(raw) = lookup("PULLPANE_REFRESH_DELAY_MS") {
        match raw.trim().parse::<u64>() {
            Ok(ms) => config.refresh_delay_ms = ms,
            Err(_) => warn!(value = %raw, "ignoring unparseable PULLPANE_REFRESH_DELAY_MS"),
        }
    }

    config
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Overrides taken from explicitly-set CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--no-pull-to-refresh` sets `Some(false)`.
    pub enable_pull_to_refresh: Option<bool>,
    /// `--refresh-delay-ms`.
    pub refresh_delay_ms: Option<u64>,
    /// `--view`.
    pub view: Option<String>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(enabled) = overrides.enable_pull_to_refresh {
        config.enable_pull_to_refresh = enabled;
    }

    if let Some(ms) = overrides.refresh_delay_ms {
        config.refresh_delay_ms = ms;
    }

    if let Some(view) = overrides.view {
        config.view = view;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
