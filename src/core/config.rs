//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.homeloan/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HomeloanConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOG_FILE: &str = "homeloan.log";
pub const BASE_URL_ENV: &str = "HOMELOAN_API_BASE_URL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Chat service base URL, trailing slashes stripped.
    pub base_url: String,
    pub log_file: String,
}

/// Values given on the command line. `None` = flag not specified.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub base_url: Option<&'a str>,
    pub log_file: Option<&'a str>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.homeloan/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".homeloan").join("config.toml"))
}

/// Where the loaded config came from.
///
/// Loading runs before the file logger exists, so nothing is logged while
/// loading; `main` calls [`ConfigSource::log`] once the logger is up.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Parsed from an existing file
    Loaded(PathBuf),
    /// File was missing; a commented default was written there
    Generated(PathBuf),
    /// File was missing and the default could not be written
    GenerateFailed { path: PathBuf, reason: String },
    /// No home directory; defaults only
    NoHomeDir,
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::Loaded(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Generated(path) => {
                info!("No config file found, generated default at {}", path.display())
            }
            ConfigSource::GenerateFailed { path, reason } => warn!(
                "No config file found, failed to write default at {}: {}",
                path.display(),
                reason
            ),
            ConfigSource::NoHomeDir => {
                warn!("Could not determine home directory, using default config")
            }
        }
    }
}

/// Load config from `~/.homeloan/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HomeloanConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<(HomeloanConfig, ConfigSource), ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok((HomeloanConfig::default(), ConfigSource::NoHomeDir)),
    }
}

pub fn load_config_from(path: &Path) -> Result<(HomeloanConfig, ConfigSource), ConfigError> {
    if !path.exists() {
        let source = match generate_default_config(path) {
            Ok(()) => ConfigSource::Generated(path.to_path_buf()),
            Err(e) => ConfigSource::GenerateFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        };
        return Ok((HomeloanConfig::default(), source));
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HomeloanConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    Ok((config, ConfigSource::Loaded(path.to_path_buf())))
}

/// Writes a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# Homeloan Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://localhost:8000"   # Or set HOMELOAN_API_BASE_URL

# [logging]
# file = "homeloan.log"
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &HomeloanConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    resolve_with_env(config, cli, std::env::var(BASE_URL_ENV).ok())
}

fn resolve_with_env(
    config: &HomeloanConfig,
    cli: &CliOverrides<'_>,
    env_base_url: Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(|s| s.to_string())
        .or(env_base_url)
        .or_else(|| config.api.base_url.clone())
        .map(|s| normalize_base_url(&s))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Log file: CLI → config → default
    let log_file = cli
        .log_file
        .map(|s| s.to_string())
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig { base_url, log_file }
}

/// Strips surrounding whitespace and every trailing slash.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
