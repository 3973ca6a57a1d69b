//! Logging setup.
//!
//! Logs go to stderr (or a file) so the status line on stdout stays clean.
//! Settings are read from the environment first, then CLI flags are laid on
//! top. `RUST_LOG`, when set, replaces the computed filter entirely.

use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, format::FmtSpan, writer::BoxMakeWriter};
use tracing_subscriber::prelude::*;

const LOG_LEVEL_ENV: &str = "AISTATUS_LOG";
const LOG_FORMAT_ENV: &str = "AISTATUS_LOG_FORMAT";
const LOG_FILE_ENV: &str = "AISTATUS_LOG_FILE";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain text without timestamps.
    #[default]
    Human,
    /// One JSON object per event, span closes included.
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "human" | "text" => Some(Self::Human),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Minimum level that reaches the log output.
///
/// Ordered from most to least verbose. The default is `Warn`, which is enough
/// to surface fetch failures without drowning the status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" | "verbose" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LogLevel,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    /// Read `AISTATUS_LOG`, `AISTATUS_LOG_FORMAT` and `AISTATUS_LOG_FILE`.
    ///
    /// Blank or unrecognised values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            level: env_value(LOG_LEVEL_ENV)
                .and_then(|v| LogLevel::from_arg(&v))
                .unwrap_or_default(),
            format: env_value(LOG_FORMAT_ENV)
                .and_then(|v| LogFormat::from_arg(&v))
                .unwrap_or_default(),
            file: env_value(LOG_FILE_ENV).map(PathBuf::from),
        }
    }

    /// Apply `--log-level`, `--json-output` and `--verbose`.
    ///
    /// `--verbose` lowers a warn or error level to debug; an explicit info
    /// or finer level is kept.
    #[must_use]
    pub fn with_cli(mut self, level: Option<&str>, json: bool, verbose: bool) -> Self {
        if let Some(level) = level.and_then(LogLevel::from_arg) {
            self.level = level;
        }
        if json {
            self.format = LogFormat::Json;
        }
        if verbose && self.level >= LogLevel::Warn {
            self.level = LogLevel::Debug;
        }
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("aistatus={}", self.level.as_filter())))
    }

    fn writer(&self) -> BoxMakeWriter {
        let file = self.file.as_ref().and_then(|path| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });
        match file {
            Some(file) => BoxMakeWriter::new(file),
            None => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(settings: &LogSettings) {
    let layer = match settings.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(settings.writer())
            .boxed(),
        LogFormat::Human => fmt::layer()
            .with_target(false)
            .without_time()
            .with_writer(settings.writer())
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(settings.filter())
        .with(layer)
        .try_init()
        .ok();
}
