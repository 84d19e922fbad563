//! Spinner support for long-running operations.
//!
//! Wraps `indicatif` so callers never have to check whether progress output
//! is appropriate: when `AXM_NO_PROGRESS` is set or stderr is not a
//! terminal, a hidden bar is returned and all operations become no-ops.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Check whether progress indicators should be disabled.
#[must_use]
pub fn is_progress_disabled() -> bool {
    std::env::var("AXM_NO_PROGRESS").is_ok() || !std::io::stderr().is_terminal()
}

/// A spinner that renders only when a terminal wants one.
#[derive(Clone)]
pub struct Spinner {
    inner: IndicatifBar,
}

impl Spinner {
    #[must_use]
    pub fn new() -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self { inner: bar }
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    pub fn finish_with_message(&self, msg: impl Into<String>) {
        self.inner.finish_with_message(msg.into());
    }

    /// Remove the spinner from the terminal without a final message.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_spinner_is_inert() {
        let spinner = Spinner::new();
        spinner.set_message("working");
        spinner.finish_with_message("done");
    }
}
