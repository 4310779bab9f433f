//! Progress indicators for library batches.
//!
//! A thin wrapper over `indicatif` with the tool's styling. Whether bars are
//! drawn is decided by the caller (`--no-progress` and `--quiet` hide them),
//! so a hidden bar can be passed around and used exactly like a visible one.
//!
//! # Examples
//!
//! ```rust
//! use lbrmeta::utils::progress::ProgressBar;
//!
//! let progress = ProgressBar::new(3, false);
//! for name in ["a.lbr", "b.lbr", "c.lbr"] {
//!     progress.set_message(name);
//!     progress.inc(1);
//! }
//! progress.finish_and_clear();
//! ```

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};

/// A progress bar with consistent styling.
///
/// Cloning yields another handle to the same bar.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Creates a bar tracking `len` units of work; hidden when `hidden` is set.
    pub fn new(len: u64, hidden: bool) -> Self {
        let bar = if hidden {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new(len);
            bar.set_style(default_style());
            bar
        };
        Self {
            inner: bar,
        }
    }

    /// A bar that never draws.
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    /// Sets the message shown next to the bar.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Advances the bar by `delta`.
    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    /// Prints a line above the bar without tearing it.
    ///
    /// Hidden bars print nothing, so status output goes through `println!`
    /// when the bar is hidden.
    pub fn println(&self, line: impl AsRef<str>) {
        if self.inner.is_hidden() {
            println!("{}", line.as_ref());
        } else {
            self.inner.println(line.as_ref());
        }
    }

    /// Hides the bar while `f` writes to the terminal.
    pub fn suspend<F: FnOnce() -> T, T>(&self, f: F) -> T {
        self.inner.suspend(f)
    }

    /// Finishes the bar and removes it from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

fn default_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_bar())
        .progress_chars("━╸━")
}
