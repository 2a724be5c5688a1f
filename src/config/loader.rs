//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ERRDOC_CONFIG";

/// Environment variable overriding `pretty`.
pub const PRETTY_ENV_VAR: &str = "ERRDOC_PRETTY";

/// Environment variable overriding `log_file_path`.
pub const LOG_FILE_ENV_VAR: &str = "ERRDOC_LOG_FILE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
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
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/errdoc/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Pretty-print each output document instead of one compact line.
    #[serde(default)]
    pub pretty: Option<bool>,

    /// Wrap each error document with its processor tag.
    #[serde(default)]
    pub envelope: Option<bool>,

    /// Abort on the first malformed input line instead of skipping it.
    #[serde(default)]
    pub fail_on_malformed: Option<bool>,

    /// Path to log file for tracing output. Logs go to stderr when unset.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Pretty-print output documents.
    pub pretty: bool,
    /// Emit `{"processor": ..., "error": ...}` envelopes.
    pub envelope: bool,
    /// Treat malformed input lines as fatal.
    pub fail_on_malformed: bool,
    /// Tracing output file; `None` means stderr.
    pub log_file_path: Option<PathBuf>,
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
/// Returns `~/.config/errdoc/config.toml` on Unix, appropriate path on other
/// platforms. Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("errdoc").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `ERRDOC_CONFIG` environment variable
/// 3. Default path `~/.config/errdoc/config.toml`
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

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        pretty: config.pretty.unwrap_or(defaults.pretty),
        envelope: config.envelope.unwrap_or(defaults.envelope),
        fail_on_malformed: config
            .fail_on_malformed
            .unwrap_or(defaults.fail_on_malformed),
        log_file_path: config.log_file_path.or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `ERRDOC_PRETTY`: `1`/`true`/`yes` enable, `0`/`false`/`no` disable,
///   anything else is ignored
/// - `ERRDOC_LOG_FILE`: tracing output file
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(pretty) = std::env::var(PRETTY_ENV_VAR)
        .ok()
        .and_then(|v| parse_flag(&v))
    {
        config.pretty = pretty;
    }

    if let Ok(path) = std::env::var(LOG_FILE_ENV_VAR) {
        if !path.is_empty() {
            config.log_file_path = Some(PathBuf::from(path));
        }
    }

    config
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Only flags the user actually passed
/// are given as `Some`.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    pretty_override: Option<bool>,
    envelope_override: Option<bool>,
    fail_on_malformed_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(pretty) = pretty_override {
        config.pretty = pretty;
    }

    if let Some(envelope) = envelope_override {
        config.envelope = envelope;
    }

    if let Some(fail) = fail_on_malformed_override {
        config.fail_on_malformed = fail;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
