//! Output rendering: the status bar surface and one-shot reports.

pub mod error;
pub mod robot;
pub mod terminal;

use crate::core::aggregate::StatusDisplay;
use crate::core::notifier::Notice;

pub use robot::RobotSink;
pub use terminal::TerminalSink;

/// A persistent status element plus a channel for transient messages.
///
/// Implementations are driven by the monitor: `render` after every change,
/// `notify` for alerts and refresh outcomes, `clear` at shutdown.
pub trait StatusSink: Send {
    /// Show the latest aggregated state.
    fn render(&mut self, display: &StatusDisplay);

    /// Show a transient message.
    fn notify(&mut self, notice: &Notice);

    /// Remove the element from the surface.
    fn clear(&mut self);
}

impl<T: StatusSink + ?Sized> StatusSink for Box<T> {
    fn render(&mut self, display: &StatusDisplay) {
        (**self).render(display);
    }

    fn notify(&mut self, notice: &Notice) {
        (**self).notify(notice);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
