//! Transfer progress reporting
//!
//! The engine calls `percent` when the total is known (download direction)
//! and `bytes` when it is not (upload receiver). `NoProgress` keeps server
//! hot paths free of terminal work.

use indicatif::{ProgressBar, ProgressStyle};

pub trait Progress {
    fn percent(&mut self, _pct: u8) {}
    fn bytes(&mut self, _total: u64) {}
    fn finish(&mut self) {}
}

pub struct NoProgress;
impl Progress for NoProgress {}

pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    /// Fixed-width percent bar for transfers with a known total.
    pub fn percent_bar() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:50}] {pos}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }
}

impl Progress for BarProgress {
    fn percent(&mut self, pct: u8) {
        self.bar.set_position(u64::from(pct));
    }

    fn finish(&mut self) {
        self.bar.finish();
    }
}
