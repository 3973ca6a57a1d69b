//! Core data models.
//!
//! Readings, severities, and the per-service snapshots kept by the monitor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::service::ServiceId;

// =============================================================================
// Status Indicator
// =============================================================================

/// Raw statuspage.io indicator values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusIndicator {
    #[default]
    None,
    Minor,
    Major,
    Critical,
    Maintenance,
    Unknown,
}

impl StatusIndicator {
    /// Parse from statuspage.io indicator string.
    #[must_use]
    pub fn from_statuspage(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "none" => Self::None,
            "minor" => Self::Minor,
            "major" => Self::Major,
            "critical" => Self::Critical,
            "maintenance" | "under_maintenance" => Self::Maintenance,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Operational",
            Self::Minor => "Minor Issue",
            Self::Major => "Major Issue",
            Self::Critical => "Critical",
            Self::Maintenance => "Maintenance",
            Self::Unknown => "Unknown",
        }
    }

    /// Collapse to a two-valued reading. Only `none` counts as normal.
    #[must_use]
    pub const fn reading(self) -> Reading {
        match self {
            Self::None => Reading::Normal,
            _ => Reading::Degraded,
        }
    }
}

// =============================================================================
// Reading
// =============================================================================

/// Latest known health of one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reading {
    #[default]
    Normal,
    Degraded,
}

impl Reading {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Degraded => "degraded",
        }
    }

    /// Title-case label for tooltips.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Degraded => "Degraded",
        }
    }

    #[must_use]
    pub const fn is_degraded(self) -> bool {
        matches!(self, Self::Degraded)
    }
}

// =============================================================================
// Aggregate Severity
// =============================================================================

/// Three-level summary of all readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Ok,
    PossiblyDegrading,
    Degraded,
}

impl Severity {
    /// Codicon name for the status bar.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Ok => "$(circle-filled)",
            Self::PossiblyDegrading => "$(warning)",
            Self::Degraded => "$(error)",
        }
    }

    /// Foreground color as a hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Ok => "#89D185",
            Self::PossiblyDegrading => "#FF8800",
            Self::Degraded => "#FF0000",
        }
    }

    /// Text shown next to the icon when text display is on.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "Working",
            Self::PossiblyDegrading => "Possibly Degrading",
            Self::Degraded => "Degraded",
        }
    }
}

// =============================================================================
// Service Snapshot
// =============================================================================

/// Reading plus the details of the last successful fetch for one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSnapshot {
    pub service: ServiceId,
    pub reading: Reading,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<StatusIndicator>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<DateTime<Utc>>,
}

impl ServiceSnapshot {
    /// Snapshot before any fetch has completed.
    #[must_use]
    pub const fn initial(service: ServiceId) -> Self {
        Self {
            service,
            reading: Reading::Normal,
            indicator: None,
            description: None,
            checked_at: None,
        }
    }
}

/// One successfully parsed status page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub service: ServiceId,
    pub indicator: StatusIndicator,
    pub reading: Reading,
    pub description: String,
    pub fetched_at: DateTime<Utc>,
}

// =============================================================================
// Readings
// =============================================================================

/// Latest snapshot of every monitored service, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readings {
    snapshots: [ServiceSnapshot; 3],
}

impl Readings {
    /// All services normal, nothing fetched yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            snapshots: [
                ServiceSnapshot::initial(ServiceId::OpenAi),
                ServiceSnapshot::initial(ServiceId::Anthropic),
                ServiceSnapshot::initial(ServiceId::Cursor),
            ],
        }
    }

    /// Build from explicit readings (handy for tests and previews).
    #[must_use]
    pub fn from_readings(openai: Reading, anthropic: Reading, cursor: Reading) -> Self {
        let mut readings = Self::new();
        readings.set(ServiceId::OpenAi, openai);
        readings.set(ServiceId::Anthropic, anthropic);
        readings.set(ServiceId::Cursor, cursor);
        readings
    }

    #[must_use]
    pub const fn get(&self, id: ServiceId) -> Reading {
        self.snapshots[id.index()].reading
    }

    #[must_use]
    pub const fn snapshot(&self, id: ServiceId) -> &ServiceSnapshot {
        &self.snapshots[id.index()]
    }

    /// Overwrite the reading of one service.
    pub fn set(&mut self, id: ServiceId, reading: Reading) {
        self.snapshots[id.index()].reading = reading;
    }

    /// Apply a fetched report, returning the previous reading.
    pub fn apply(&mut self, report: &StatusReport) -> Reading {
        let slot = &mut self.snapshots[report.service.index()];
        let previous = slot.reading;
        slot.reading = report.reading;
        slot.indicator = Some(report.indicator);
        slot.description = Some(report.description.clone());
        slot.checked_at = Some(report.fetched_at);
        previous
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceSnapshot> {
        self.snapshots.iter()
    }
}

impl Default for Readings {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Robot Output
// =============================================================================

/// Schema tag carried by every JSON document.
pub const SCHEMA_VERSION: &str = "aistatus.v1";

/// Top-level JSON envelope for robot mode output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotOutput<T> {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub command: String,
    pub data: T,

    #[serde(default)]
    pub errors: Vec<String>,
}

impl<T> RobotOutput<T> {
    /// Create a new robot output envelope.
    pub fn new(command: impl Into<String>, data: T) -> Self {
        Self::with_errors(command, data, Vec::new())
    }

    /// Create with errors.
    pub fn with_errors(command: impl Into<String>, data: T, errors: Vec<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            command: command.into(),
            data,
            errors,
        }
    }
}
