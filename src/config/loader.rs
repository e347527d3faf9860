//! Config file discovery and layering of defaults, file, env and CLI.
//!
//! Values are sanitized once here, so the engine only ever sees
//! thresholds in `(0, 1]` and a non-zero tick.

use crate::engine::{RampConfig, RevealTiming, Threshold};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "REVEALDECK_CONFIG";

/// Environment variable forcing reduced motion on or off.
pub const REDUCE_MOTION_ENV_VAR: &str = "REVEALDECK_REDUCE_MOTION";

/// A config file exists but is unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// The file is not valid TOML or has unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Skip entrance transitions and counter ramps.
    #[serde(default)]
    pub reduce_motion: Option<bool>,

    /// Visible fraction at which a section is revealed.
    #[serde(default)]
    pub section_threshold: Option<f64>,

    /// Visible fraction at which a counter starts.
    #[serde(default)]
    pub counter_threshold: Option<f64>,

    /// Counter ramp length in milliseconds.
    #[serde(default)]
    pub counter_duration_ms: Option<u64>,

    /// Counter tick interval in milliseconds.
    #[serde(default)]
    pub tick_ms: Option<u64>,

    /// Section entrance transition in milliseconds.
    #[serde(default)]
    pub reveal_transition_ms: Option<u64>,

    /// Per-section entrance delay step in milliseconds.
    #[serde(default)]
    pub stagger_ms: Option<u64>,

    /// Lines moved per scroll step.
    #[serde(default)]
    pub scroll_lines: Option<u16>,

    /// Reserved for remapping keys; accepted and ignored.
    #[serde(default)]
    pub keybindings: Option<toml::Value>,
}

/// Final settings with every layer applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Skip entrance transitions and counter ramps.
    pub reduce_motion: bool,
    /// Section reveal threshold, in `(0, 1]`.
    pub section_threshold: f64,
    /// Counter start threshold, in `(0, 1]`.
    pub counter_threshold: f64,
    /// Counter ramp length in milliseconds.
    pub counter_duration_ms: u64,
    /// Counter tick interval in milliseconds (>= 1).
    pub tick_ms: u64,
    /// Section entrance transition in milliseconds.
    pub reveal_transition_ms: u64,
    /// Per-section entrance delay step in milliseconds.
    pub stagger_ms: u64,
    /// Lines moved per scroll step (>= 1).
    pub scroll_lines: u16,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_path(),
            reduce_motion: false,
            section_threshold: Threshold::SECTION.get(),
            counter_threshold: Threshold::COUNTER.get(),
            counter_duration_ms: 1500,
            tick_ms: 16,
            reveal_transition_ms: 700,
            stagger_ms: 100,
            scroll_lines: 1,
        }
    }
}

impl ResolvedConfig {
    /// Threshold for section reveals.
    pub fn section_threshold(&self) -> Threshold {
        Threshold::new(self.section_threshold)
    }

    /// Threshold for counter starts.
    pub fn counter_threshold(&self) -> Threshold {
        Threshold::new(self.counter_threshold)
    }

    /// Counter ramp timing; instant under reduced motion.
    pub fn ramp(&self) -> RampConfig {
        let tick = Duration::from_millis(self.tick_ms.max(1));
        if self.reduce_motion {
            return RampConfig {
                duration: Duration::ZERO,
                tick,
            };
        }
        RampConfig {
            duration: Duration::from_millis(self.counter_duration_ms),
            tick,
        }
    }

    /// Section entrance timing; instant under reduced motion.
    pub fn reveal_timing(&self) -> RevealTiming {
        if self.reduce_motion {
            return RevealTiming::instant();
        }
        RevealTiming {
            transition: Duration::from_millis(self.reveal_transition_ms),
            stagger: Duration::from_millis(self.stagger_ms),
        }
    }

    /// Frame interval of the event loop while something animates.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/revealdeck/revealdeck.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("revealdeck").join("revealdeck.log")
    } else {
        PathBuf::from("revealdeck.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

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
/// Returns `~/.config/revealdeck/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("revealdeck").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `REVEALDECK_CONFIG` environment variable
/// 3. Default path `~/.config/revealdeck/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
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

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `REVEALDECK_REDUCE_MOTION`: `1`/`true`/`yes`/`on` or `0`/`false`/`no`/`off`.
///   Other values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(REDUCE_MOTION_ENV_VAR) {
        if let Some(flag) = parse_flag(&raw) {
            config.reduce_motion = flag;
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

/// Fill in missing file values from the defaults.
///
/// Out-of-range values are pulled back into range.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        reduce_motion: config.reduce_motion.unwrap_or(defaults.reduce_motion),
        section_threshold: config
            .section_threshold
            .map(|t| Threshold::new(t).get())
            .unwrap_or(defaults.section_threshold),
        counter_threshold: config
            .counter_threshold
            .map(|t| Threshold::new(t).get())
            .unwrap_or(defaults.counter_threshold),
        counter_duration_ms: config
            .counter_duration_ms
            .unwrap_or(defaults.counter_duration_ms),
        tick_ms: config.tick_ms.unwrap_or(defaults.tick_ms).max(1),
        reveal_transition_ms: config
            .reveal_transition_ms
            .unwrap_or(defaults.reveal_transition_ms),
        stagger_ms: config.stagger_ms.unwrap_or(defaults.stagger_ms),
        scroll_lines: config.scroll_lines.unwrap_or(defaults.scroll_lines).max(1),
    }
}

/// Apply flags given on the command line. `None` leaves the value alone.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    reduce_motion_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(reduce_motion) = reduce_motion_override {
        config.reduce_motion = reduce_motion;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_revealdeck_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("revealdeck.log"),
            "Default log path should end with 'revealdeck.log', got: {:?}",
            path
        );
    }

    #[test]
    fn resolved_config_default_includes_log_path() {
        let config = ResolvedConfig::default();
        assert!(
            !config.log_file_path.as_os_str().is_empty(),
            "Default config should have non-empty log_file_path"
        );
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/app.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));
        assert_eq!(
            resolved.log_file_path, custom_path,
            "Config file log_file_path should override default"
        );
    }
}
