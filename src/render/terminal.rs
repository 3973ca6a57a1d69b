//! Terminal status line.
//!
//! On a TTY the line is redrawn in place; otherwise every update is printed
//! on its own line so the output stays readable when piped.

use std::io::Write;

use colored::{Color, Colorize};

use super::StatusSink;
use crate::core::aggregate::StatusDisplay;
use crate::core::notifier::{Notice, NoticeLevel};

const CLEAR_LINE: &str = "\r\x1b[2K";

/// Map a codicon reference to a terminal glyph.
#[must_use]
pub fn glyph(icon: &str) -> &'static str {
    match icon {
        "$(circle-filled)" => "●",
        "$(warning)" => "⚠",
        "$(error)" => "✖",
        _ => "•",
    }
}

/// Parse `#RRGGBB` into a true color.
#[must_use]
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(Color::TrueColor {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Plain-text status line: glyph text followed by the tooltip on one line.
#[must_use]
pub fn format_line(display: &StatusDisplay) -> String {
    let text = display.text.replacen(display.icon, glyph(display.icon), 1);
    let tooltip = display.tooltip.replace('\n', " | ");
    format!("{text}  {tooltip}")
}

/// Status line writer for terminals and pipes.
pub struct TerminalSink<W: Write + Send> {
    out: W,
    color: bool,
    in_place: bool,
    last_line: Option<String>,
}

impl TerminalSink<std::io::Stdout> {
    /// Sink on stdout, redrawing in place when stdout is a TTY.
    #[must_use]
    pub fn stdout(color: bool) -> Self {
        Self::new(
            std::io::stdout(),
            color,
            crate::util::env::stdout_is_tty(),
        )
    }
}

impl<W: Write + Send> TerminalSink<W> {
    #[must_use]
    pub const fn new(out: W, color: bool, in_place: bool) -> Self {
        Self {
            out,
            color,
            in_place,
            last_line: None,
        }
    }

    /// Consume the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, display: &StatusDisplay) -> String {
        let line = format_line(display);
        match parse_hex_color(display.color) {
            Some(color) if self.color => line.color(color).to_string(),
            _ => line,
        }
    }

    fn write_line(&mut self, line: &str) {
        let result = if self.in_place {
            write!(self.out, "{CLEAR_LINE}{line}")
        } else {
            writeln!(self.out, "{line}")
        };
        if let Err(e) = result.and_then(|()| self.out.flush()) {
            tracing::debug!(error = %e, "Failed to write status line");
        }
    }
}

impl<W: Write + Send> StatusSink for TerminalSink<W> {
    fn render(&mut self, display: &StatusDisplay) {
        let line = self.paint(display);
        if self.last_line.as_deref() == Some(line.as_str()) && self.in_place {
            return;
        }
        self.write_line(&line);
        self.last_line = Some(line);
    }

    fn notify(&mut self, notice: &Notice) {
        let prefix = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        let prefix = if self.color {
            match notice.level {
                NoticeLevel::Info => prefix.blue().bold().to_string(),
                NoticeLevel::Warning => prefix.yellow().bold().to_string(),
                NoticeLevel::Error => prefix.red().bold().to_string(),
            }
        } else {
            prefix.to_string()
        };

        let message = format!("{prefix}: {}", notice.message);
        if self.in_place {
            self.write_line(&format!("{message}\n"));
            if let Some(line) = self.last_line.clone() {
                self.write_line(&line);
            }
        } else {
            self.write_line(&message);
        }
    }

    fn clear(&mut self) {
        if self.in_place {
            self.write_line("");
            self.last_line = None;
        }
    }
}
