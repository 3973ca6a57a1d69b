//! Common test utilities for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: statuspage mock mounting and service lists
//! - `log_capture`: in-test capture of tracing events
//! - `logger`: structured test progress logging

#![allow(dead_code)]

pub mod fixtures;
pub mod log_capture;
pub mod logger;
