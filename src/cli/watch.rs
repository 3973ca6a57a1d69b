//! Watch mode: a live status line with interactive commands.
//!
//! Reads one command per line from stdin:
//! - `t` / `toggle`: show or hide the severity label
//! - `r` / `refresh`: poll every service now
//! - `q` / `quit`: stop
//!
//! Ctrl+C also stops. Closing stdin does not; polling continues until a
//! signal arrives.

use std::future::Future;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::cli::args::WatchArgs;
use crate::core::monitor::StatusMonitor;
use crate::core::scheduler::Scheduler;
use crate::core::status::StatusFetcher;
use crate::error::Result;
use crate::render::{RobotSink, StatusSink, TerminalSink};
use crate::storage::ResolvedConfig;

/// A command typed into watch mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchCommand {
    ToggleText,
    Refresh,
    Quit,
}

impl WatchCommand {
    /// Parse one input line (case-insensitive, surrounding whitespace ignored).
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "t" | "toggle" => Some(Self::ToggleText),
            "r" | "refresh" => Some(Self::Refresh),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Run watch mode until quit or Ctrl+C.
///
/// # Errors
/// Returns an error if the HTTP client cannot be built.
pub async fn execute(args: &WatchArgs, config: &ResolvedConfig, no_color: bool) -> Result<()> {
    let fetcher = StatusFetcher::new(config.timeout)?;
    let input = BufReader::new(tokio::io::stdin());
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Ctrl+C handler unavailable, use `q` to quit");
            std::future::pending::<()>().await;
        }
    };

    if args.json {
        let monitor = StatusMonitor::new(
            config.services.clone(),
            fetcher,
            RobotSink::stdout(),
            config.show_text,
        );
        run_watch(Arc::new(monitor), config.interval, input, shutdown).await;
    } else {
        let color = crate::util::env::should_use_color(no_color);
        let monitor = StatusMonitor::new(
            config.services.clone(),
            fetcher,
            TerminalSink::stdout(color),
            config.show_text,
        );
        run_watch(Arc::new(monitor), config.interval, input, shutdown).await;
    }
    Ok(())
}

/// Drive the scheduler and react to commands until `quit` or `shutdown` resolves.
pub async fn run_watch<S, R, F>(
    monitor: Arc<StatusMonitor<S>>,
    interval: std::time::Duration,
    input: R,
    shutdown: F,
) where
    S: StatusSink + 'static,
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    let scheduler = Scheduler::start(Arc::clone(&monitor), interval);
    let mut refreshes = JoinSet::new();
    let mut lines = input.lines();
    let mut input_open = true;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line {
                    Ok(Some(line)) => match WatchCommand::parse(&line) {
                        Some(WatchCommand::ToggleText) => {
                            monitor.toggle_text();
                        }
                        Some(WatchCommand::Refresh) => {
                            let monitor = Arc::clone(&monitor);
                            refreshes.spawn(async move {
                                if let Err(e) = monitor.refresh_command().await {
                                    debug!(error = %e, "Manual refresh failed");
                                }
                            });
                        }
                        Some(WatchCommand::Quit) => break,
                        None => debug!(input = %line.trim(), "Ignoring unknown command"),
                    },
                    Ok(None) => {
                        debug!("Command input closed");
                        input_open = false;
                    }
                    Err(e) => {
                        debug!(error = %e, "Command input failed");
                        input_open = false;
                    }
                }
            }
            Some(joined) = refreshes.join_next(), if !refreshes.is_empty() => {
                if let Err(e) = joined {
                    debug!(error = %e, "Manual refresh task ended abnormally");
                }
            }
            () = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
        }
    }

    // A refresh still in flight must not draw on the cleared display.
    refreshes.shutdown().await;
    scheduler.shutdown();
}
