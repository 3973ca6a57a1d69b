//! Structured progress logging for integration tests.
//!
//! Each test creates a [`TestLogger`], marks phases as it goes, and calls
//! [`TestLogger::finish_ok`] at the end. Output goes to stderr, which the
//! harness only shows for failing tests.
//!
//! # Environment Variables
//!
//! - `TEST_LOG_JSON` - Set to "1" or "true" for one JSON object per line

use std::env;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

static JSON_MODE: OnceLock<bool> = OnceLock::new();

fn is_json_mode() -> bool {
    *JSON_MODE.get_or_init(|| {
        env::var("TEST_LOG_JSON").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
    })
}

/// Structured log entry for JSON output mode.
#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    timestamp: DateTime<Utc>,
    test: &'a str,
    phase: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u128>,
}

/// Per-test logger with phase and duration tracking.
pub struct TestLogger {
    test_name: String,
    start_time: Instant,
    current_phase: Mutex<String>,
}

impl TestLogger {
    #[must_use]
    pub fn new(test_name: &str) -> Self {
        let logger = Self {
            test_name: test_name.to_string(),
            start_time: Instant::now(),
            current_phase: Mutex::new("init".to_string()),
        };
        logger.emit("Test starting", None);
        logger
    }

    /// Set the current test phase (setup, execute, verify).
    pub fn phase(&self, phase: &str) {
        phase.clone_into(
            &mut self
                .current_phase
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        self.emit(&format!("Phase: {phase}"), None);
    }

    pub fn info(&self, message: &str) {
        self.emit(message, None);
    }

    /// Log an HTTP request made against a mock server.
    pub fn http_request(&self, method: &str, url: &str) {
        self.emit(&format!("HTTP {method} {url}"), None);
    }

    /// Mark test as passed with duration.
    pub fn finish_ok(&self) {
        let duration_ms = self.start_time.elapsed().as_millis();
        self.emit(
            &format!("Test passed (duration: {duration_ms}ms)"),
            Some(duration_ms),
        );
    }

    fn emit(&self, message: &str, duration_ms: Option<u128>) {
        let phase = self
            .current_phase
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if is_json_mode() {
            let entry = LogEntry {
                timestamp: Utc::now(),
                test: &self.test_name,
                phase: &phase,
                message,
                duration_ms,
            };
            if let Ok(line) = serde_json::to_string(&entry) {
                eprintln!("{line}");
            }
        } else {
            eprintln!(
                "[{}] [{}] [{phase}] {message}",
                Utc::now().format("%H:%M:%S%.3f"),
                self.test_name
            );
        }
    }
}
