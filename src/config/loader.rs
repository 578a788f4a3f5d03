//! Configuration file loading with precedence handling.

use crate::export::SessionExportFormat;
use crate::state::pagination::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BUSCADOR_CONFIG";
/// Environment override for [`ResolvedConfig::server_url`].
pub const SERVER_URL_ENV: &str = "BUSCADOR_SERVER_URL";
/// Environment override for [`ResolvedConfig::download_dir`].
pub const DOWNLOAD_DIR_ENV: &str = "BUSCADOR_DOWNLOAD_DIR";

/// Backend address when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
/// Per-request timeout when nothing else is configured.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
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
/// Corresponds to `~/.config/buscador/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Backend root URL.
    #[serde(default)]
    pub server_url: Option<String>,

    /// Document (table) sent as the `doc` search parameter.
    #[serde(default)]
    pub document: Option<String>,

    /// Result rows per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Per-request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Directory CSV exports are written to.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,

    /// Layout of `busqueda.csv`.
    #[serde(default)]
    pub session_export_format: Option<SessionExportFormat>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Backend root URL.
    pub server_url: String,
    /// `doc` search parameter, if any.
    pub document: Option<String>,
    /// Result rows per page, at least 1.
    pub page_size: usize,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Export directory.
    pub download_dir: PathBuf,
    /// Layout of `busqueda.csv`.
    pub session_export_format: SessionExportFormat,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            document: None,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            download_dir: default_download_dir(),
            session_export_format: SessionExportFormat::default(),
            log_file_path: default_log_path(),
        }
    }
}

/// Overrides taken from command-line flags.
///
/// `None` means the flag was not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--server`.
    pub server_url: Option<String>,
    /// `--download-dir`.
    pub download_dir: Option<PathBuf>,
    /// `--page-size`.
    pub page_size: Option<usize>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/buscador/buscador.log` on Linux, or the
/// platform's state directory elsewhere. Falls back to the current
/// directory when there is none.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("buscador").join("buscador.log")
    } else {
        PathBuf::from("buscador.log")
    }
}

/// Resolve default export directory: the user's download directory, or the
/// current directory.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
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

    // Missing file is not an error
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
/// Returns `~/.config/buscador/config.toml` on Linux, appropriate path on
/// other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("buscador").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `BUSCADOR_CONFIG` environment variable
/// 3. Default path `~/.config/buscador/config.toml`
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

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `BUSCADOR_SERVER_URL` and `BUSCADOR_DOWNLOAD_DIR`; empty values
/// are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(url) = std::env::var(SERVER_URL_ENV) {
        if !url.trim().is_empty() {
            config.server_url = url;
        }
    }

    if let Ok(dir) = std::env::var(DOWNLOAD_DIR_ENV) {
        if !dir.trim().is_empty() {
            config.download_dir = PathBuf::from(dir);
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        server_url: config.server_url.unwrap_or(defaults.server_url),
        document: config.document.or(defaults.document),
        page_size: config.page_size.unwrap_or(defaults.page_size).max(1),
        request_timeout_secs: config
            .request_timeout_secs
            .unwrap_or(defaults.request_timeout_secs),
        download_dir: config.download_dir.unwrap_or(defaults.download_dir),
        session_export_format: config
            .session_export_format
            .unwrap_or(defaults.session_export_format),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(url) = cli.server_url {
        config.server_url = url;
    }

    if let Some(dir) = cli.download_dir {
        config.download_dir = dir;
    }

    if let Some(size) = cli.page_size {
        config.page_size = size.max(1);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
