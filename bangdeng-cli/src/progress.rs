//! Terminal progress bar for batched store writes.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use bangdeng_etl::UploadProgress;

pub(crate) struct BarProgress {
    pb: ProgressBar,
}

impl BarProgress {
    /// A bar over `total` writes. Hidden when `quiet`.
    pub(crate) fn new(total: usize, quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
            );
            pb
        };
        Self { pb }
    }
}

impl UploadProgress for BarProgress {
    fn on_batch(&self, done: usize, total: usize, committed: bool) {
        self.pb.set_length(total as u64);
        self.pb.set_position(done as u64);
        if !committed {
            self.pb.suspend(|| {
                log::warn!(
                    "  {} batch ending at {} was not committed",
                    "\u{26A0}".if_supports_color(Stderr, |t| t.yellow()),
                    done
                );
            });
        }
    }

    fn on_phase(&self, message: &str) {
        self.pb.suspend(|| log::info!("{}", message));
    }

    fn on_complete(&self, message: &str) {
        self.pb.finish_and_clear();
        log::info!("{}", message);
    }
}
