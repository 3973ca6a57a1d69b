//! One-shot status check.

use crate::cli::args::CheckArgs;
use crate::core::aggregate::StatusDisplay;
use crate::core::monitor::StatusMonitor;
use crate::core::notifier::Notice;
use crate::core::status::StatusFetcher;
use crate::error::{AistatusError, Result};
use crate::render::robot::{CheckReport, render_check_json};
use crate::render::{StatusSink, TerminalSink};
use crate::storage::ResolvedConfig;

/// Keeps notices, ignores intermediate renders.
#[derive(Debug, Default)]
struct NoticeCollector {
    notices: Vec<Notice>,
}

impl StatusSink for NoticeCollector {
    fn render(&mut self, _display: &StatusDisplay) {}

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn clear(&mut self) {}
}

/// Outcome of a check pass.
#[derive(Debug)]
pub struct CheckOutcome {
    pub report: CheckReport,
    pub notices: Vec<Notice>,
    pub errors: Vec<AistatusError>,
}

/// Poll every service once. Unlike the sequential refresh pass, a failing
/// service does not stop the others from being checked.
///
/// # Errors
/// Returns an error only if the HTTP client cannot be built.
pub async fn run_check(config: &ResolvedConfig) -> Result<CheckOutcome> {
    let fetcher = StatusFetcher::new(config.timeout)?;
    let monitor = StatusMonitor::new(
        config.services.clone(),
        fetcher,
        NoticeCollector::default(),
        config.show_text,
    );

    let mut errors = Vec::new();
    for service in monitor.services() {
        if let Err(e) = monitor.refresh_service(service.id).await {
            errors.push(e);
        }
    }

    let report = CheckReport::new(monitor.display(), &monitor.readings());
    let notices = monitor.with_sink(|sink| sink.notices.clone());
    Ok(CheckOutcome {
        report,
        notices,
        errors,
    })
}

/// Execute the `check` command.
///
/// # Errors
/// Returns [`AistatusError::RefreshFailed`] after printing the status if any
/// service could not be read.
pub async fn execute(args: &CheckArgs, config: &ResolvedConfig, no_color: bool) -> Result<()> {
    let outcome = run_check(config).await?;
    let failed = outcome.errors.len();

    if args.json {
        let errors = outcome.errors.iter().map(ToString::to_string).collect();
        println!("{}", render_check_json(outcome.report, errors, args.pretty)?);
    } else {
        for err in &outcome.errors {
            eprintln!("{err}");
        }
        for notice in &outcome.notices {
            eprintln!("{}", notice.message);
        }
        let color = crate::util::env::should_use_color(no_color);
        TerminalSink::new(std::io::stdout(), color, false).render(&outcome.report.display);
    }

    if failed > 0 {
        return Err(AistatusError::RefreshFailed { failed });
    }
    Ok(())
}
