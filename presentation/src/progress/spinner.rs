//! Spinner shown while a one-shot request is in flight

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Wraps an indicatif spinner; a quiet spinner draws nothing
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Start spinning on stderr with `message`
    pub fn start(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::style());
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    /// A spinner that never draws (`--quiet`)
    pub fn hidden() -> Self {
        Self { bar: None }
    }

    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
    }

    /// Stop and leave a success line behind
    pub fn finish(self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Stop and leave a failure line behind
    pub fn fail(self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Stop and erase the spinner line
    pub fn clear(self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
