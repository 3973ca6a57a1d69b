//! Configuration file loading and management.
//!
//! Loads configuration from:
//! - Linux: `~/.config/aistatus/config.toml`
//! - macOS: `~/Library/Application Support/dev.aistatus.aistatus/config.toml`
//! - Windows: `%APPDATA%/aistatus/aistatus/config/config.toml`
//!
//! ## Precedence
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. CLI flags
//! 2. Environment variables
//! 3. Config file
//! 4. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `AISTATUS_CONFIG`: Override config file path
//! - `AISTATUS_INTERVAL`: Poll interval in seconds
//! - `AISTATUS_TIMEOUT`: Request timeout in seconds
//! - `AISTATUS_SHOW_TEXT`: Show the severity label next to the icon (1, true, yes)
//!
//! ## Example
//!
//! ```toml
//! [general]
//! interval_seconds = 300
//! timeout_seconds = 10
//! show_text = true
//!
//! [services.openai]
//! tier = "critical"
//!
//! [services.cursor]
//! base_url = "https://status.cursor.com"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::AppPaths;
use crate::core::service::{Service, ServiceId, Tier};
use crate::error::{AistatusError, Result};

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Environment variable to override config file path.
pub const ENV_CONFIG: &str = "AISTATUS_CONFIG";
/// Environment variable for the poll interval in seconds.
pub const ENV_INTERVAL: &str = "AISTATUS_INTERVAL";
/// Environment variable for the request timeout in seconds.
pub const ENV_TIMEOUT: &str = "AISTATUS_TIMEOUT";
/// Environment variable to show the severity label.
pub const ENV_SHOW_TEXT: &str = "AISTATUS_SHOW_TEXT";

/// Accepted poll interval range, in seconds.
const INTERVAL_RANGE: std::ops::RangeInclusive<u64> = 1..=86_400;
/// Accepted request timeout range, in seconds.
const TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=300;

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Settings supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub interval_seconds: Option<u64>,
    pub timeout_seconds: Option<u64>,
    pub show_text: bool,
}

/// Fully resolved configuration after merging CLI, env vars, and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Monitored services with their tiers and endpoints.
    pub services: Vec<Service>,
    /// Time between polls of one service.
    pub interval: Duration,
    /// Per-request timeout; `None` lets a hung request run until the next tick.
    pub timeout: Option<Duration>,
    /// Whether the severity label is shown next to the icon.
    pub show_text: bool,
    /// Source of each setting for debugging.
    pub sources: ConfigSources,
}

/// Tracks the source of each configuration value.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub interval: ConfigSource,
    pub timeout: ConfigSource,
    pub show_text: ConfigSource,
}

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from CLI flag.
    Cli,
    /// Value from environment variable.
    Env,
    /// Value from config file.
    ConfigFile,
    /// Built-in default.
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI flag"),
            Self::Env => write!(f, "environment variable"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl ResolvedConfig {
    /// Resolve final configuration from CLI overrides, environment variables,
    /// and the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is invalid, or if any
    /// resolved value is out of range.
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let config = Self::load_config(cli)?;
        config.validate()?;
        Self::resolve_with(cli, &config)
    }

    /// Resolve against an already loaded config file.
    ///
    /// # Errors
    ///
    /// Returns an error if a CLI or environment value is out of range.
    pub fn resolve_with(cli: &CliOverrides, config: &Config) -> Result<Self> {
        let mut sources = ConfigSources::default();

        let interval = Self::resolve_interval(cli, config, &mut sources.interval)?;
        let timeout = Self::resolve_timeout(cli, config, &mut sources.timeout)?;
        let show_text = Self::resolve_show_text(cli, config, &mut sources.show_text);

        let resolved = Self {
            services: config.services(),
            interval,
            timeout,
            show_text,
            sources,
        };
        tracing::debug!(
            interval_secs = resolved.interval.as_secs(),
            interval_source = %resolved.sources.interval,
            timeout_secs = ?resolved.timeout.map(|t| t.as_secs()),
            show_text = resolved.show_text,
            "Resolved configuration"
        );
        Ok(resolved)
    }

    /// Load config file, respecting `--config` and `AISTATUS_CONFIG`.
    fn load_config(cli: &CliOverrides) -> Result<Config> {
        if let Some(path) = &cli.config_path {
            Config::load_from(path)
        } else if let Ok(path) = std::env::var(ENV_CONFIG) {
            Config::load_from(Path::new(&path))
        } else {
            Config::load()
        }
    }

    fn resolve_interval(
        cli: &CliOverrides,
        config: &Config,
        source: &mut ConfigSource,
    ) -> Result<Duration> {
        // 1. CLI --interval flag
        if let Some(secs) = cli.interval_seconds {
            *source = ConfigSource::Cli;
            return checked_secs("interval", secs, &INTERVAL_RANGE);
        }

        // 2. Environment variable
        if let Some(secs) = Self::env_u64(ENV_INTERVAL)? {
            *source = ConfigSource::Env;
            return checked_secs(ENV_INTERVAL, secs, &INTERVAL_RANGE);
        }

        // 3. Config file
        if let Some(secs) = config.general.interval_seconds {
            *source = ConfigSource::ConfigFile;
            return Ok(Duration::from_secs(secs));
        }

        *source = ConfigSource::Default;
        Ok(Duration::from_secs(GeneralConfig::DEFAULT_INTERVAL_SECS))
    }

    fn resolve_timeout(
        cli: &CliOverrides,
        config: &Config,
        source: &mut ConfigSource,
    ) -> Result<Option<Duration>> {
        if let Some(secs) = cli.timeout_seconds {
            *source = ConfigSource::Cli;
            return checked_secs("timeout", secs, &TIMEOUT_RANGE).map(Some);
        }

        if let Some(secs) = Self::env_u64(ENV_TIMEOUT)? {
            *source = ConfigSource::Env;
            return checked_secs(ENV_TIMEOUT, secs, &TIMEOUT_RANGE).map(Some);
        }

        if let Some(secs) = config.general.timeout_seconds {
            *source = ConfigSource::ConfigFile;
            return Ok(Some(Duration::from_secs(secs)));
        }

        *source = ConfigSource::Default;
        Ok(None)
    }

    fn resolve_show_text(cli: &CliOverrides, config: &Config, source: &mut ConfigSource) -> bool {
        if cli.show_text {
            *source = ConfigSource::Cli;
            return true;
        }

        if Self::is_env_truthy(ENV_SHOW_TEXT) {
            *source = ConfigSource::Env;
            return true;
        }

        if config.general.show_text {
            *source = ConfigSource::ConfigFile;
            return true;
        }

        *source = ConfigSource::Default;
        false
    }

    /// Read a numeric environment variable; unset or blank yields `None`.
    fn env_u64(var: &str) -> Result<Option<u64>> {
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => value
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|_| AistatusError::ConfigInvalid {
                    key: var.to_string(),
                    message: format!("expected a number of seconds, got '{value}'"),
                }),
            _ => Ok(None),
        }
    }

    /// Check if an environment variable is set to a truthy value.
    fn is_env_truthy(var: &str) -> bool {
        std::env::var(var)
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false)
    }
}

fn checked_secs(key: &str, secs: u64, range: &std::ops::RangeInclusive<u64>) -> Result<Duration> {
    if range.contains(&secs) {
        Ok(Duration::from_secs(secs))
    } else {
        Err(AistatusError::ConfigInvalid {
            key: key.to_string(),
            message: format!(
                "must be between {} and {} seconds, got {secs}",
                range.start(),
                range.end()
            ),
        })
    }
}

// =============================================================================
// Config File
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Per-service settings.
    pub services: ServicesConfig,
}

/// General application settings.
///
/// Fields left out of the file stay `None`, so resolution can tell a value
/// the user wrote apart from the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Seconds between polls of one service.
    pub interval_seconds: Option<u64>,
    /// Optional per-request timeout in seconds.
    pub timeout_seconds: Option<u64>,
    /// Show the severity label next to the icon.
    pub show_text: bool,
}

impl GeneralConfig {
    pub const DEFAULT_INTERVAL_SECS: u64 = 300;
}

/// Settings for each monitored service. Unknown service names are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServicesConfig {
    pub openai: ServiceSettings,
    pub anthropic: ServiceSettings,
    pub cursor: ServiceSettings,
}

impl ServicesConfig {
    #[must_use]
    pub const fn get(&self, id: ServiceId) -> &ServiceSettings {
        match id {
            ServiceId::OpenAi => &self.openai,
            ServiceId::Anthropic => &self.anthropic,
            ServiceId::Cursor => &self.cursor,
        }
    }
}

/// Settings for a specific service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceSettings {
    /// Criticality tier (defaults: cursor critical, others standard).
    pub tier: Option<Tier>,
    /// Status page base URL (if different from the public one).
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns error only if the file exists but is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AistatusError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Get the config file path.
    #[must_use]
    pub fn config_path() -> PathBuf {
        AppPaths::new().config_file()
    }

    /// Monitored services with tier and endpoint overrides applied.
    #[must_use]
    pub fn services(&self) -> Vec<Service> {
        ServiceId::ALL
            .iter()
            .map(|&id| {
                let settings = self.services.get(id);
                Service {
                    id,
                    tier: settings.tier.unwrap_or_else(|| id.default_tier()),
                    base_url: settings
                        .base_url
                        .clone()
                        .unwrap_or_else(|| id.default_base_url().to_string()),
                }
            })
            .collect()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if let Some(interval) = self.general.interval_seconds {
            checked_secs("general.interval_seconds", interval, &INTERVAL_RANGE)?;
        }

        if let Some(timeout) = self.general.timeout_seconds {
            checked_secs("general.timeout_seconds", timeout, &TIMEOUT_RANGE)?;
        }

        for &id in ServiceId::ALL {
            if let Some(url) = &self.services.get(id).base_url {
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    return Err(AistatusError::ConfigInvalid {
                        key: format!("services.{}.base_url", id.key()),
                        message: format!("\"{url}\" is not an http(s) URL"),
                    });
                }
            }
        }

        Ok(())
    }
}
