//! One-shot degradation alerts.
//!
//! Each critical-tier service gets a latch: it fires once when the service
//! degrades and re-arms when it recovers.

use serde::Serialize;

use super::models::Reading;
use super::service::{Service, ServiceId};

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// The alert raised when a critical service degrades.
    #[must_use]
    pub fn degraded(service: ServiceId) -> Self {
        Self::warning(format!("{service} services are currently degraded"))
    }
}

/// Latch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatchState {
    /// No alert shown.
    #[default]
    Armed,
    /// Alert shown; suppressed until recovery.
    Fired,
}

/// Notification latch for one critical service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegradationLatch {
    service: ServiceId,
    state: LatchState,
}

impl DegradationLatch {
    #[must_use]
    pub const fn new(service: ServiceId) -> Self {
        Self {
            service,
            state: LatchState::Armed,
        }
    }

    #[must_use]
    pub const fn service(&self) -> ServiceId {
        self.service
    }

    #[must_use]
    pub const fn state(&self) -> LatchState {
        self.state
    }

    /// Feed the latest reading; returns the alert to show, if any.
    pub fn observe(&mut self, reading: Reading) -> Option<Notice> {
        match (self.state, reading) {
            (LatchState::Armed, Reading::Degraded) => {
                self.state = LatchState::Fired;
                Some(Notice::degraded(self.service))
            }
            (LatchState::Fired, Reading::Normal) => {
                self.state = LatchState::Armed;
                None
            }
            _ => None,
        }
    }
}

/// The set of latches for every critical-tier service.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    latches: Vec<DegradationLatch>,
}

impl Notifier {
    /// One latch per critical service; standard services never alert.
    #[must_use]
    pub fn new(services: &[Service]) -> Self {
        Self {
            latches: services
                .iter()
                .filter(|s| s.is_critical())
                .map(|s| DegradationLatch::new(s.id))
                .collect(),
        }
    }

    /// Feed a reading for `service`.
    pub fn observe(&mut self, service: ServiceId, reading: Reading) -> Option<Notice> {
        self.latches
            .iter_mut()
            .find(|latch| latch.service() == service)
            .and_then(|latch| latch.observe(reading))
    }

    #[must_use]
    pub fn latch(&self, service: ServiceId) -> Option<&DegradationLatch> {
        self.latches.iter().find(|latch| latch.service() == service)
    }
}
