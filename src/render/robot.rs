//! Robot-mode output (JSON).
//!
//! Stable, line-oriented output for status bars and scripts that consume JSON.

use std::io::Write;

use serde::Serialize;

use super::StatusSink;
use crate::core::aggregate::StatusDisplay;
use crate::core::models::{Readings, RobotOutput, ServiceSnapshot, Severity};
use crate::core::notifier::Notice;
use crate::error::Result;

/// Render any serializable output as JSON.
pub fn render_json<T: Serialize>(output: &T) -> Result<String> {
    Ok(serde_json::to_string(output)?)
}

/// Render any serializable output as pretty JSON.
pub fn render_json_pretty<T: Serialize>(output: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

/// Payload of `aistatus check --json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub severity: Severity,
    pub display: StatusDisplay,
    pub services: Vec<ServiceSnapshot>,
}

impl CheckReport {
    #[must_use]
    pub fn new(display: StatusDisplay, readings: &Readings) -> Self {
        Self {
            severity: display.severity,
            display,
            services: readings.iter().cloned().collect(),
        }
    }
}

/// Render a check report inside the robot envelope.
pub fn render_check_json(report: CheckReport, errors: Vec<String>, pretty: bool) -> Result<String> {
    let output = RobotOutput::with_errors("check", report, errors);
    if pretty {
        render_json_pretty(&output)
    } else {
        render_json(&output)
    }
}

/// One line of `watch --json` output.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
enum SinkEvent<'a> {
    Display(&'a StatusDisplay),
    Notice(&'a Notice),
    Clear,
}

/// Sink emitting one JSON object per event.
pub struct RobotSink<W: Write + Send> {
    out: W,
}

impl RobotSink<std::io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> RobotSink<W> {
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &SinkEvent<'_>) {
        let result = render_json(event).and_then(|line| {
            writeln!(self.out, "{line}")?;
            self.out.flush()?;
            Ok(())
        });
        if let Err(e) = result {
            tracing::debug!(error = %e, "Failed to write JSON event");
        }
    }
}

impl<W: Write + Send> StatusSink for RobotSink<W> {
    fn render(&mut self, display: &StatusDisplay) {
        self.emit(&SinkEvent::Display(display));
    }

    fn notify(&mut self, notice: &Notice) {
        self.emit(&SinkEvent::Notice(notice));
    }

    fn clear(&mut self) {
        self.emit(&SinkEvent::Clear);
    }
}
