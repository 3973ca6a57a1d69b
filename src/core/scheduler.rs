//! Polling schedule.
//!
//! One sequential pass at startup, then an independent fixed-interval timer
//! per service so a slow or failing fetch never delays the others.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

use super::monitor::StatusMonitor;
use crate::render::StatusSink;

/// Default time between polls of one service.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(300);

/// Running poll timers. Dropping the handle stops them.
#[derive(Debug)]
pub struct Scheduler<S: StatusSink + 'static> {
    monitor: Arc<StatusMonitor<S>>,
    tasks: Vec<JoinHandle<()>>,
}

impl<S: StatusSink + 'static> Scheduler<S> {
    /// Kick off the startup pass and one timer per service.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(monitor: Arc<StatusMonitor<S>>, period: Duration) -> Self {
        let mut tasks = Vec::with_capacity(monitor.services().len() + 1);

        let initial = Arc::clone(&monitor);
        tasks.push(tokio::spawn(async move {
            match initial.refresh_all().await {
                Ok(()) => debug!("Initial status pass complete"),
                Err(e) => warn!(error = %e, "Initial status pass incomplete"),
            }
        }));

        for service in monitor.services() {
            let id = service.id;
            let monitor = Arc::clone(&monitor);
            tasks.push(tokio::spawn(async move {
                let mut ticker = interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    if let Err(e) = monitor.refresh_service(id).await {
                        debug!(service = %id, error = %e, "Scheduled refresh failed");
                    }
                }
            }));
        }

        info!(
            services = monitor.services().len(),
            interval_secs = period.as_secs(),
            "Status polling started"
        );

        Self { monitor, tasks }
    }

    #[must_use]
    pub fn monitor(&self) -> &Arc<StatusMonitor<S>> {
        &self.monitor
    }

    /// Number of tasks still running.
    #[must_use]
    pub fn active_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }

    /// Stop every timer and clear the display surface.
    pub fn shutdown(mut self) {
        self.abort_all();
        self.monitor.clear();
        info!("Status polling stopped");
    }

    fn abort_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl<S: StatusSink + 'static> Drop for Scheduler<S> {
    fn drop(&mut self) {
        self.abort_all();
    }
}
