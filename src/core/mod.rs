//! Core data models, polling, aggregation, and scheduling.

pub mod aggregate;
pub mod http;
pub mod logging;
pub mod models;
pub mod monitor;
pub mod notifier;
pub mod scheduler;
pub mod service;
pub mod status;

pub use aggregate::{StatusDisplay, aggregate, render};
pub use models::{
    Reading, Readings, RobotOutput, ServiceSnapshot, Severity, StatusIndicator, StatusReport,
};
pub use monitor::StatusMonitor;
pub use notifier::{DegradationLatch, LatchState, Notice, NoticeLevel, Notifier};
pub use scheduler::Scheduler;
pub use service::{Service, ServiceId, Tier, builtin_services};
pub use status::StatusFetcher;
