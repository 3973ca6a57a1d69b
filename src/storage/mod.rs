//! Storage for configuration.

pub mod config;
pub mod paths;

pub use config::{
    CliOverrides, Config, ConfigSource, ConfigSources, ENV_CONFIG, ENV_INTERVAL, ENV_SHOW_TEXT,
    ENV_TIMEOUT, ResolvedConfig,
};
pub use paths::AppPaths;
