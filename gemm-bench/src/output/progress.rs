//! Progress display using indicatif.

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while the sweep runs; updated per configuration phase.
pub struct SweepProgress {
    bar: ProgressBar,
}

impl SweepProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { bar }
    }

    /// Finish and clear the spinner.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Return a callback closure for use with run_sweep.
    pub fn callback(&self) -> impl Fn(&str) + '_ {
        move |msg: &str| {
            self.bar.set_message(msg.to_string());
        }
    }
}

impl Default for SweepProgress {
    fn default() -> Self {
        Self::new()
    }
}
