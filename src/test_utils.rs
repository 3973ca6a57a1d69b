//! Test utilities for aistatus.
//!
//! Provides a recording sink, statuspage fixtures, and assertion macros
//! for use across all test modules.
//!
//! # Usage
//!
//! ```rust,ignore
//! use aistatus::test_utils::*;
//!
//! let body = statuspage_body("major");
//! let report = make_test_report(ServiceId::Cursor, "major");
//! let dir = TestDir::new();
//! dir.create_file("config.toml", &make_test_config_toml("http://127.0.0.1:9"));
//! ```

use chrono::Utc;
use std::fs;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};

use crate::core::aggregate::StatusDisplay;
use crate::core::models::{StatusIndicator, StatusReport};
use crate::core::notifier::{Notice, NoticeLevel};
use crate::core::service::ServiceId;
use crate::render::StatusSink;

// =============================================================================
// Recording Sink
// =============================================================================

/// A [`StatusSink`] that keeps everything it is given.
///
/// # Examples
///
/// ```rust,ignore
/// let monitor = StatusMonitor::new(services, fetcher, RecordingSink::default(), false);
/// monitor.with_sink(|sink| assert_eq!(sink.displays().len(), 1));
/// ```
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    displays: Vec<StatusDisplay>,
    notices: Vec<Notice>,
    cleared: bool,
}

impl RecordingSink {
    /// Every display rendered so far, oldest first.
    #[must_use]
    pub fn displays(&self) -> &[StatusDisplay] {
        &self.displays
    }

    #[must_use]
    pub fn last_display(&self) -> Option<&StatusDisplay> {
        self.displays.last()
    }

    /// Every notice shown so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Notices at one level.
    #[must_use]
    pub fn notices_at(&self, level: NoticeLevel) -> Vec<&Notice> {
        self.notices.iter().filter(|n| n.level == level).collect()
    }

    /// Whether `clear` was called after the last render.
    #[must_use]
    pub const fn is_cleared(&self) -> bool {
        self.cleared
    }
}

impl StatusSink for RecordingSink {
    fn render(&mut self, display: &StatusDisplay) {
        self.displays.push(display.clone());
        self.cleared = false;
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn clear(&mut self) {
        self.cleared = true;
    }
}

// =============================================================================
// Statuspage Fixtures
// =============================================================================

/// A statuspage.io `status.json` body with the given indicator.
///
/// # Examples
///
/// ```rust,ignore
/// use aistatus::test_utils::statuspage_body;
///
/// let body = statuspage_body("none");
/// assert!(body.contains("\"indicator\":\"none\""));
/// ```
#[must_use]
pub fn statuspage_body(indicator: &str) -> String {
    let description = match indicator {
        "none" => "All Systems Operational",
        "minor" => "Partially Degraded Service",
        "major" => "Partial System Outage",
        "critical" => "Major System Outage",
        _ => "Service Under Maintenance",
    };
    statuspage_body_with(indicator, description)
}

/// A statuspage.io `status.json` body with an explicit description.
#[must_use]
pub fn statuspage_body_with(indicator: &str, description: &str) -> String {
    serde_json::json!({
        "page": {
            "id": "kctbh9vrtdwd",
            "name": "Test Status",
            "url": "https://status.example.com",
            "time_zone": "Etc/UTC",
            "updated_at": "2026-01-15T12:00:00.000Z"
        },
        "status": {
            "indicator": indicator,
            "description": description
        }
    })
    .to_string()
}

/// A parsed report as the fetcher would produce it.
#[must_use]
pub fn make_test_report(service: ServiceId, indicator: &str) -> StatusReport {
    let parsed = StatusIndicator::from_statuspage(indicator);
    StatusReport {
        service,
        indicator: parsed,
        reading: parsed.reading(),
        description: parsed.label().to_string(),
        fetched_at: Utc::now(),
    }
}

/// Config TOML pointing every service at `base_url`.
///
/// Each service gets its own path prefix so one mock server can answer for
/// all three: `<base_url>/openai`, `<base_url>/anthropic`, `<base_url>/cursor`.
#[must_use]
pub fn make_test_config_toml(base_url: &str) -> String {
    format!(
        r#"[general]
interval_seconds = 300
show_text = false

[services.openai]
base_url = "{base_url}/openai"

[services.anthropic]
base_url = "{base_url}/anthropic"

[services.cursor]
base_url = "{base_url}/cursor"
"#
    )
}

// =============================================================================
// Temporary Directory
// =============================================================================

/// An isolated temporary directory, removed when dropped.
///
/// # Examples
///
/// ```rust,ignore
/// use aistatus::test_utils::TestDir;
///
/// let dir = TestDir::new();
/// dir.create_file("config.toml", "[general]\ninterval_seconds = 60");
/// assert!(dir.file_exists("config.toml"));
/// ```
pub struct TestDir {
    inner: tempfile::TempDir,
}

impl TestDir {
    /// Create a new isolated temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Create a file with the given content, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be created or written.
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.inner.path().join(name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        let mut file = fs::File::create(&path).expect("Failed to create test file");
        file.write_all(content.as_bytes())
            .expect("Failed to write test file");
    }

    /// Read a file from the temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read_file(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.inner.path().join(name))
    }

    #[must_use]
    pub fn file_exists(&self, name: &str) -> bool {
        self.inner.path().join(name).exists()
    }

    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.inner.path().join(name)
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Assertion Macros
// =============================================================================

/// Assert that a string contains a substring.
///
/// # Examples
///
/// ```rust,ignore
/// use aistatus::assert_contains;
///
/// assert_contains!("Cursor: Degraded", "Degraded");
/// ```
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = $haystack;
        let needle = $needle;
        assert!(
            haystack.contains(needle),
            "Expected string to contain {:?}\n\nActual string:\n{:?}",
            needle,
            haystack
        );
    };
}

/// Assert that every line of a string is valid JSON.
#[macro_export]
macro_rules! assert_jsonl_valid {
    ($text:expr) => {
        let text: &str = $text;
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            if let Err(e) = serde_json::from_str::<serde_json::Value>(line) {
                panic!("Expected JSON line, parsing failed: {}\n\nLine:\n{}", e, line);
            }
        }
    };
}

/// Assert that a string contains no ANSI escape codes.
#[macro_export]
macro_rules! assert_no_ansi_codes {
    ($text:expr) => {
        let text = $text;
        assert!(
            !text.contains('\x1b'),
            "Expected string to NOT contain ANSI escape codes.\n\nActual string:\n{:?}",
            text
        );
    };
}
