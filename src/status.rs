//! Process-scoped progress indicator
//!
//! At most one spinner runs at a time. The handle is created once by the
//! CLI and passed by reference to whatever needs to report progress.

use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::time::Duration;

pub struct StatusHandle {
    current: RefCell<Option<ProgressBar>>,
    visible: bool,
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

impl StatusHandle {
    /// Spinner drawn on stderr
    pub fn new() -> Self {
        Self {
            current: RefCell::new(None),
            visible: true,
        }
    }

    /// Handle that tracks state but never draws
    pub fn hidden() -> Self {
        Self {
            current: RefCell::new(None),
            visible: false,
        }
    }

    /// Start a spinner, replacing any that is still running
    pub fn start(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("status: {}", message);

        let spinner = if self.visible {
            let pb = ProgressBar::new_spinner();
            pb.set_style(spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };
        spinner.set_message(message);

        if let Some(previous) = self.current.replace(Some(spinner)) {
            previous.finish_and_clear();
        }
    }

    /// Finish the running spinner with a success or failure mark
    pub fn stop(&self, success: bool, message: impl Into<String>) {
        let Some(spinner) = self.current.borrow_mut().take() else {
            return;
        };
        let mark = if success {
            console::style("✓").green()
        } else {
            console::style("✗").red()
        };
        spinner.finish_with_message(format!("{} {}", mark, message.into()));
    }

    pub fn is_active(&self) -> bool {
        self.current.borrow().is_some()
    }
}

impl Default for StatusHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_stop() {
        let status = StatusHandle::hidden();
        assert!(!status.is_active());

        status.start("Connecting...");
        assert!(status.is_active());

        status.start("Replaced");
        assert!(status.is_active());

        status.stop(true, "done");
        assert!(!status.is_active());

        // Stopping twice is a no-op
        status.stop(false, "ignored");
        assert!(!status.is_active());
    }
}
