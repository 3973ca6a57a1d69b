//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::storage::CliOverrides;

/// AI service status monitor - one indicator for OpenAI, Anthropic, and Cursor.
#[derive(Parser, Debug)]
#[command(name = "aistatus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // === Global flags ===
    /// Config file path (overrides AISTATUS_CONFIG)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit JSONL logs to stderr
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Command-line settings that take part in config resolution.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        let (interval_seconds, show_text) = match &self.command {
            Some(Commands::Watch(args)) => (args.interval, args.show_text),
            Some(Commands::Check(args)) => (None, args.show_text),
            Some(Commands::Services(_)) | None => (None, false),
        };
        CliOverrides {
            config_path: self.config.clone(),
            interval_seconds,
            timeout_seconds: self.timeout,
            show_text,
        }
    }

    /// Whether the selected command writes JSON to stdout.
    #[must_use]
    pub const fn wants_json(&self) -> bool {
        match &self.command {
            Some(Commands::Watch(args)) => args.json,
            Some(Commands::Check(args)) => args.json,
            Some(Commands::Services(args)) => args.json,
            None => false,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Keep a live status line, polling every service on its own timer
    Watch(WatchArgs),

    /// Poll every service once and print the aggregate status
    Check(CheckArgs),

    /// List monitored services, their tiers, and endpoints
    Services(ServicesArgs),
}

/// Arguments for the `watch` command.
#[derive(Args, Debug, Clone, Default)]
pub struct WatchArgs {
    /// Seconds between polls of each service (default: 300)
    #[arg(long, value_name = "SECONDS")]
    pub interval: Option<u64>,

    /// Show the severity label next to the icon
    #[arg(long)]
    pub show_text: bool,

    /// Emit one JSON object per display update
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Show the severity label next to the icon
    #[arg(long)]
    pub show_text: bool,

    /// JSON output
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the `services` command.
#[derive(Args, Debug, Clone, Default)]
pub struct ServicesArgs {
    /// JSON output
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn watch_flags_flow_into_overrides() {
        let cli = Cli::parse_from([
            "aistatus",
            "--timeout",
            "10",
            "watch",
            "--interval",
            "60",
            "--show-text",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.interval_seconds, Some(60));
        assert_eq!(overrides.timeout_seconds, Some(10));
        assert!(overrides.show_text);
        assert!(!cli.wants_json());
    }

    #[test]
    fn check_json_flag() {
        let cli = Cli::parse_from(["aistatus", "check", "--json", "--pretty"]);
        assert!(cli.wants_json());
        assert_eq!(cli.overrides().interval_seconds, None);
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli = Cli::parse_from(["aistatus", "services", "--config", "/tmp/x.toml"]);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/x.toml")));
    }
}
