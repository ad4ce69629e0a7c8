//! Terminal progress indicators.
//!
//! Bars draw on stderr and stay hidden when stderr is not a terminal, so
//! piped runs and tests only see log output.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// A spinner or bar that may be disabled.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    /// A progress handle that never draws.
    #[must_use]
    pub fn hidden() -> Self {
        Self { bar: None }
    }

    /// A spinner for work of unknown length.
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} [{pos} repos, {elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self::attach(bar, message)
    }

    /// A bar over `total` items.
    #[must_use]
    pub fn bar(total: u64, message: &str) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template("{msg}: {wide_bar:.cyan/blue} {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self::attach(bar, message)
    }

    fn attach(bar: ProgressBar, message: &str) -> Self {
        if !std::io::stderr().is_terminal() {
            return Self::hidden();
        }

        bar.set_draw_target(ProgressDrawTarget::stderr());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    /// Replaces the text next to the indicator.
    pub fn set_message(&self, message: String) {
        if let Some(bar) = &self.bar {
            bar.set_message(message);
        }
    }

    /// Advances the position by `delta` items.
    pub fn inc(&self, delta: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(delta);
        }
    }

    /// Stops drawing and erases the indicator.
    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar {
            if !bar.is_finished() {
                bar.abandon();
            }
        }
    }
}
