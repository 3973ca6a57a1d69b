//! CLI argument parsing and command dispatch.

pub mod args;
pub mod check;
pub mod services;
pub mod watch;

pub use args::{Cli, Commands};
