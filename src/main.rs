//! aistatus - AI service status monitor
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use std::process::ExitCode;

use aistatus::cli::{Cli, Commands};
use aistatus::core::logging;
use aistatus::storage::ResolvedConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_settings = logging::LogSettings::from_env().with_cli(
        cli.log_level.as_deref(),
        cli.json_output,
        cli.verbose,
    );
    logging::init(&log_settings);

    let json = cli.wants_json();
    let no_color = cli.no_color || !aistatus::util::env::stderr_is_tty();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", aistatus::render::error::render_error(&e, json, no_color));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: Cli) -> aistatus::Result<()> {
    let Some(command) = &cli.command else {
        print_quickstart();
        return Ok(());
    };

    let config = ResolvedConfig::resolve(&cli.overrides())?;

    match command {
        Commands::Watch(args) => aistatus::cli::watch::execute(args, &config, cli.no_color).await,
        Commands::Check(args) => aistatus::cli::check::execute(args, &config, cli.no_color).await,
        Commands::Services(args) => aistatus::cli::services::execute(args, &config),
    }
}

/// Print quickstart help when no command is given.
fn print_quickstart() {
    println!(
        r"aistatus - AI service status monitor

One status indicator for OpenAI, Anthropic, and Cursor.

USAGE:
    aistatus [OPTIONS] <COMMAND>

COMMANDS:
    watch       Keep a live status line (t = toggle text, r = refresh, q = quit)
    check       Poll every service once and print the aggregate status
    services    List monitored services, their tiers, and endpoints

QUICK START:
    aistatus watch                  # Live indicator, polls every 5 minutes
    aistatus watch --show-text      # Show the severity label next to the icon
    aistatus check                  # One-shot status line

ROBOT MODE (for AI agents):
    aistatus check --json           # JSON report
    aistatus watch --json           # One JSON event per update

For more help: aistatus --help
"
    );
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
}
