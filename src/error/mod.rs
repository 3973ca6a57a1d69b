//! Error types for aistatus.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! - **Network**: connection, DNS, TLS, timeout, or non-success HTTP status
//! - **Configuration**: config file parsing or invalid values
//! - **Provider**: a status page answered with something we could not read
//! - **Internal**: I/O and serialization failures
//!
//! Each error has a stable error code (e.g., `AIST-N001`) for programmatic handling.

use thiserror::Error;

use crate::core::service::ServiceId;

/// High-level error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network issues (timeout, DNS, TLS, connection refused, HTTP status).
    Network,
    /// Configuration issues (parse errors, invalid values).
    Configuration,
    /// Provider-specific issues (malformed status documents).
    Provider,
    /// Internal errors (I/O, serialization).
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network error",
            Self::Configuration => "Configuration error",
            Self::Provider => "Provider error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Network => "N",
            Self::Configuration => "C",
            Self::Provider => "P",
            Self::Internal => "X",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Unexpected failure
    GeneralError = 1,
    /// At least one status page could not be read
    FetchFailed = 2,
    /// Invalid configuration or arguments
    ConfigError = 3,
    /// Timeout
    Timeout = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Main error type for aistatus operations.
#[derive(Error, Debug)]
pub enum AistatusError {
    // ==========================================================================
    // Network errors
    // ==========================================================================
    /// Request timed out.
    #[error("request to {service} status page timed out after {seconds}s")]
    Timeout { service: ServiceId, seconds: u64 },

    /// Transport failure (DNS, connection, TLS).
    #[error("failed to fetch {service} status: {message}")]
    Transport { service: ServiceId, message: String },

    /// The status page answered with a non-success HTTP status.
    #[error("{service} status page returned HTTP {status}")]
    HttpStatus { service: ServiceId, status: u16 },

    // ==========================================================================
    // Provider errors
    // ==========================================================================
    /// The status document could not be parsed.
    #[error("failed to parse {service} status: {message}")]
    ParseResponse { service: ServiceId, message: String },

    /// One or more services failed during a refresh pass.
    #[error("failed to refresh services status: {failed} service(s) failed")]
    RefreshFailed { failed: usize },

    // ==========================================================================
    // Configuration errors
    // ==========================================================================
    /// Error parsing the configuration file.
    #[error("config parse error at {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// Invalid value in configuration.
    #[error("invalid config value for '{key}': {message}")]
    ConfigInvalid { key: String, message: String },

    /// Unknown service name.
    #[error("unknown service: {0}")]
    UnknownService(String),

    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ==========================================================================
    // Internal errors
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AistatusError {
    /// Map error to a process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Timeout { .. } => ExitCode::Timeout,
            Self::Transport { .. }
            | Self::HttpStatus { .. }
            | Self::ParseResponse { .. }
            | Self::RefreshFailed { .. } => ExitCode::FetchFailed,
            Self::ConfigParse { .. } | Self::ConfigInvalid { .. } | Self::UnknownService(_) => {
                ExitCode::ConfigError
            }
            Self::ClientBuild(_) | Self::Io(_) | Self::Json(_) => ExitCode::GeneralError,
        }
    }

    /// Returns the error category for classification.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Timeout { .. } | Self::Transport { .. } | Self::HttpStatus { .. } => {
                ErrorCategory::Network
            }
            Self::ParseResponse { .. } | Self::RefreshFailed { .. } => ErrorCategory::Provider,
            Self::ConfigParse { .. } | Self::ConfigInvalid { .. } | Self::UnknownService(_) => {
                ErrorCategory::Configuration
            }
            Self::ClientBuild(_) | Self::Io(_) | Self::Json(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `AIST-{category}{number}`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "AIST-N001",
            Self::Transport { .. } => "AIST-N002",
            Self::HttpStatus { .. } => "AIST-N003",
            Self::ParseResponse { .. } => "AIST-P001",
            Self::RefreshFailed { .. } => "AIST-P010",
            Self::ConfigParse { .. } => "AIST-C001",
            Self::ConfigInvalid { .. } => "AIST-C002",
            Self::UnknownService(_) => "AIST-C010",
            Self::ClientBuild(_) => "AIST-X001",
            Self::Io(_) => "AIST-X002",
            Self::Json(_) => "AIST-X003",
        }
    }

    /// The service a fetch error is attributed to, if any.
    #[must_use]
    pub const fn service(&self) -> Option<ServiceId> {
        match self {
            Self::Timeout { service, .. }
            | Self::Transport { service, .. }
            | Self::HttpStatus { service, .. }
            | Self::ParseResponse { service, .. } => Some(*service),
            _ => None,
        }
    }
}

/// Result type alias for aistatus operations.
pub type Result<T> = std::result::Result<T, AistatusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_name_the_failing_service() {
        let err = AistatusError::ParseResponse {
            service: ServiceId::Cursor,
            message: "expected value".to_string(),
        };
        assert_eq!(err.to_string(), "failed to parse Cursor status: expected value");
        assert_eq!(err.service(), Some(ServiceId::Cursor));

        let err = AistatusError::Transport {
            service: ServiceId::Anthropic,
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("Anthropic"));
        assert!(!err.to_string().contains("OpenAI"));
    }

    #[test]
    fn exit_codes_follow_category() {
        let timeout = AistatusError::Timeout {
            service: ServiceId::OpenAi,
            seconds: 10,
        };
        assert_eq!(timeout.exit_code(), ExitCode::Timeout);
        assert_eq!(timeout.category(), ErrorCategory::Network);

        let cfg = AistatusError::UnknownService("gemini".to_string());
        assert_eq!(cfg.exit_code(), ExitCode::ConfigError);
        assert_eq!(cfg.category(), ErrorCategory::Configuration);
        assert_eq!(cfg.service(), None);

        let refresh = AistatusError::RefreshFailed { failed: 1 };
        assert_eq!(refresh.exit_code(), ExitCode::FetchFailed);
        assert_eq!(i32::from(refresh.exit_code()), 2);
    }

    #[test]
    fn error_codes_carry_category_prefix() {
        let errors = [
            AistatusError::HttpStatus {
                service: ServiceId::Cursor,
                status: 503,
            },
            AistatusError::ConfigInvalid {
                key: "general.interval_seconds".to_string(),
                message: "must be positive".to_string(),
            },
            AistatusError::ParseResponse {
                service: ServiceId::OpenAi,
                message: "eof".to_string(),
            },
        ];
        for err in errors {
            let prefix = format!("AIST-{}", err.category().code_prefix());
            assert!(err.error_code().starts_with(&prefix), "{}", err.error_code());
        }
    }
}
