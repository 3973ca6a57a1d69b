//! Status monitor: the owned aggregate state and the operations on it.
//!
//! The monitor holds the latest readings, the notification latches, and the
//! text-visibility flag behind one lock. The lock is only taken to apply a
//! result and render; it is never held across a network request.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, instrument, warn};

use super::aggregate::{self, StatusDisplay};
use super::models::{Reading, Readings, StatusReport};
use super::notifier::{Notice, Notifier};
use super::service::{Service, ServiceId};
use super::status::StatusFetcher;
use crate::error::{AistatusError, Result};
use crate::render::StatusSink;

/// Message shown when a manual refresh succeeds.
pub const REFRESHED_MESSAGE: &str = "Services status refreshed";
/// Message shown when a manual refresh fails.
pub const REFRESH_FAILED_MESSAGE: &str = "Failed to refresh services status";

struct MonitorState<S> {
    readings: Readings,
    notifier: Notifier,
    show_text: bool,
    sink: S,
}

impl<S: StatusSink> MonitorState<S> {
    fn redraw(&mut self, services: &[Service]) -> StatusDisplay {
        let display = aggregate::render(&self.readings, services, self.show_text);
        self.sink.render(&display);
        display
    }
}

/// Polls services, keeps their readings, and drives a [`StatusSink`].
pub struct StatusMonitor<S> {
    services: Vec<Service>,
    fetcher: StatusFetcher,
    state: Mutex<MonitorState<S>>,
}

impl<S: StatusSink> StatusMonitor<S> {
    /// Create a monitor and draw the initial all-normal state.
    pub fn new(services: Vec<Service>, fetcher: StatusFetcher, sink: S, show_text: bool) -> Self {
        let notifier = Notifier::new(&services);
        let monitor = Self {
            services,
            fetcher,
            state: Mutex::new(MonitorState {
                readings: Readings::new(),
                notifier,
                show_text,
                sink,
            }),
        };
        monitor.redraw();
        monitor
    }

    fn lock(&self) -> MutexGuard<'_, MonitorState<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Look up a monitored service.
    ///
    /// # Errors
    /// Returns [`AistatusError::UnknownService`] if `id` is not monitored.
    pub fn service(&self, id: ServiceId) -> Result<&Service> {
        self.services
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AistatusError::UnknownService(id.key().to_string()))
    }

    /// Snapshot of the current readings.
    #[must_use]
    pub fn readings(&self) -> Readings {
        self.lock().readings.clone()
    }

    #[must_use]
    pub fn show_text(&self) -> bool {
        self.lock().show_text
    }

    /// Current display, computed from the current readings.
    #[must_use]
    pub fn display(&self) -> StatusDisplay {
        let state = self.lock();
        aggregate::render(&state.readings, &self.services, state.show_text)
    }

    /// Re-render the current state to the sink.
    pub fn redraw(&self) -> StatusDisplay {
        self.lock().redraw(&self.services)
    }

    /// Apply a successful fetch: overwrite the reading, redraw, and raise the
    /// degradation alert if a critical service just degraded.
    pub fn apply_report(&self, report: &StatusReport) -> Option<Notice> {
        let mut state = self.lock();
        let previous = state.readings.apply(report);
        if previous != report.reading {
            info!(
                service = %report.service,
                from = previous.as_str(),
                to = report.reading.as_str(),
                indicator = report.indicator.label(),
                "Service reading changed"
            );
        }
        state.redraw(&self.services);

        let notice = state.notifier.observe(report.service, report.reading);
        if let Some(notice) = &notice {
            warn!(service = %report.service, "{}", notice.message);
            state.sink.notify(notice);
        }
        notice
    }

    /// Fetch one service and update its reading.
    ///
    /// On failure the reading keeps its last known value and the error is logged.
    ///
    /// # Errors
    /// Returns the fetch error, attributed to `id`.
    #[instrument(skip(self), fields(service = %id))]
    pub async fn refresh_service(&self, id: ServiceId) -> Result<Reading> {
        let service = self.service(id)?;
        match self.fetcher.fetch(service).await {
            Ok(report) => {
                debug!(indicator = ?report.indicator, "Status page fetched");
                self.apply_report(&report);
                Ok(report.reading)
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "Failed to refresh {} status", id);
                Err(e)
            }
        }
    }

    /// Fetch every service in display order, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the first fetch error encountered.
    pub async fn refresh_all(&self) -> Result<()> {
        for service in &self.services {
            self.refresh_service(service.id).await?;
        }
        Ok(())
    }

    /// Manual refresh: a full pass whose outcome is reported to the user.
    ///
    /// # Errors
    /// Returns the first fetch error encountered, after notifying the sink.
    pub async fn refresh_command(&self) -> Result<()> {
        let result = self.refresh_all().await;
        let notice = if result.is_ok() {
            Notice::info(REFRESHED_MESSAGE)
        } else {
            Notice::error(REFRESH_FAILED_MESSAGE)
        };
        self.lock().sink.notify(&notice);
        result
    }

    /// Flip text visibility and redraw without refetching.
    pub fn toggle_text(&self) -> bool {
        let mut state = self.lock();
        state.show_text = !state.show_text;
        debug!(show_text = state.show_text, "Toggled status text");
        state.redraw(&self.services);
        state.show_text
    }

    /// Tear down the display surface.
    pub fn clear(&self) {
        self.lock().sink.clear();
    }

    /// Consume the monitor, returning its sink.
    pub fn into_sink(self) -> S {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .sink
    }

    /// Run `f` against the sink (used to inspect recording sinks in tests).
    pub fn with_sink<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.lock().sink)
    }
}

impl<S> std::fmt::Debug for StatusMonitor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusMonitor")
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Severity;
    use crate::core::notifier::NoticeLevel;
    use crate::core::service::{Service, builtin_services};
    use crate::test_utils::{RecordingSink, make_test_report as report};
    use tracing_test::traced_test;

    fn monitor() -> StatusMonitor<RecordingSink> {
        let fetcher = StatusFetcher::new(None).unwrap();
        StatusMonitor::new(builtin_services(), fetcher, RecordingSink::default(), false)
    }

    #[test]
    fn initial_state_is_drawn_green() {
        let monitor = monitor();
        monitor.with_sink(|sink| {
            let last = sink.last_display().unwrap();
            assert_eq!(last.severity, Severity::Ok);
            assert_eq!(last.color, "#89D185");
        });
    }

    #[test]
    fn critical_degradation_goes_red_and_warns_once() {
        let monitor = monitor();

        assert!(monitor.apply_report(&report(ServiceId::Cursor, "major")).is_some());
        assert!(monitor.apply_report(&report(ServiceId::Cursor, "major")).is_none());
        assert_eq!(monitor.display().severity, Severity::Degraded);

        assert!(monitor.apply_report(&report(ServiceId::Cursor, "none")).is_none());
        assert_eq!(monitor.display().severity, Severity::Ok);

        monitor.with_sink(|sink| {
            let warnings: Vec<_> = sink
                .notices()
                .iter()
                .filter(|n| n.level == NoticeLevel::Warning)
                .collect();
            assert_eq!(warnings.len(), 1);
            assert_eq!(warnings[0].message, "Cursor services are currently degraded");
        });
    }

    #[test]
    fn standard_degradation_is_orange_without_alert() {
        let monitor = monitor();
        assert!(monitor.apply_report(&report(ServiceId::OpenAi, "minor")).is_none());
        assert_eq!(monitor.display().severity, Severity::PossiblyDegrading);
        monitor.with_sink(|sink| assert!(sink.notices().is_empty()));
    }

    #[test]
    fn toggle_redraws_text_only() {
        let monitor = monitor();
        monitor.apply_report(&report(ServiceId::Anthropic, "minor"));
        let before = monitor.display();
        let readings = monitor.readings();

        assert!(monitor.toggle_text());
        let after = monitor.display();

        assert_eq!(before.text, "$(warning)");
        assert_eq!(after.text, "$(warning) Possibly Degrading");
        assert_eq!(before.color, after.color);
        assert_eq!(before.tooltip, after.tooltip);
        assert_eq!(monitor.readings(), readings);
        monitor.with_sink(|sink| assert_eq!(sink.last_display(), Some(&after)));

        assert!(!monitor.toggle_text());
        assert_eq!(monitor.display(), before);
    }

    #[test]
    fn clear_reaches_the_sink() {
        let monitor = monitor();
        monitor.clear();
        monitor.with_sink(|sink| assert!(sink.is_cleared()));
    }

    #[tokio::test]
    #[traced_test]
    async fn failed_refresh_keeps_reading_and_logs_service() {
        // Nothing listens on the discard port.
        let services = vec![Service {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Service::builtin(ServiceId::Anthropic)
        }];
        let fetcher = StatusFetcher::new(Some(std::time::Duration::from_secs(2))).unwrap();
        let monitor = StatusMonitor::new(services, fetcher, RecordingSink::default(), false);
        monitor.apply_report(&report(ServiceId::Anthropic, "minor"));

        let err = monitor.refresh_service(ServiceId::Anthropic).await.unwrap_err();
        assert_eq!(err.service(), Some(ServiceId::Anthropic));
        assert_eq!(monitor.readings().get(ServiceId::Anthropic), Reading::Degraded);
        assert!(logs_contain("Failed to refresh Anthropic status"));
    }

    #[tokio::test]
    async fn refresh_of_unmonitored_service_is_rejected() {
        let services = vec![Service::builtin(ServiceId::Cursor)];
        let fetcher = StatusFetcher::new(None).unwrap();
        let monitor = StatusMonitor::new(services, fetcher, RecordingSink::default(), false);
        assert!(matches!(
            monitor.refresh_service(ServiceId::OpenAi).await,
            Err(AistatusError::UnknownService(_))
        ));
    }
}
