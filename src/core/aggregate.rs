//! Aggregation of readings into a single severity and its display form.

use serde::Serialize;

use super::models::{Readings, Severity};
use super::service::{Service, Tier};

/// Combine the latest readings into one severity.
///
/// A degraded critical-tier service dominates; otherwise any degraded
/// standard-tier service yields [`Severity::PossiblyDegrading`].
#[must_use]
pub fn aggregate(readings: &Readings, services: &[Service]) -> Severity {
    let degraded = |tier: Tier| {
        services
            .iter()
            .filter(|s| s.tier == tier)
            .any(|s| readings.get(s.id).is_degraded())
    };

    if degraded(Tier::Critical) {
        Severity::Degraded
    } else if degraded(Tier::Standard) {
        Severity::PossiblyDegrading
    } else {
        Severity::Ok
    }
}

/// Everything the status bar element shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDisplay {
    pub severity: Severity,
    pub icon: &'static str,
    pub color: &'static str,
    /// Icon alone, or icon followed by the severity label.
    pub text: String,
    pub tooltip: String,
}

/// Render readings into the status bar form.
#[must_use]
pub fn render(readings: &Readings, services: &[Service], show_text: bool) -> StatusDisplay {
    let severity = aggregate(readings, services);
    let icon = severity.icon();
    let text = if show_text {
        format!("{icon} {}", severity.label())
    } else {
        icon.to_string()
    };

    StatusDisplay {
        severity,
        icon,
        color: severity.color(),
        text,
        tooltip: tooltip(readings),
    }
}

/// One `Name: Reading` line per service, in display order.
#[must_use]
pub fn tooltip(readings: &Readings) -> String {
    readings
        .iter()
        .map(|snap| format!("{}: {}", snap.service.display_name(), snap.reading.title()))
        .collect::<Vec<_>>()
        .join("\n")
}
