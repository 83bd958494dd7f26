//! Pipeline progress display for the command-line tool

use crate::io::configuration::PIPELINE_STAGES;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {msg:<24} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Reports the load / features / propagate / export pipeline stages
pub struct ProgressManager {
    bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress display covering the whole pipeline
    pub fn new() -> Self {
        let bar = ProgressBar::new(PIPELINE_STAGES);
        bar.set_style(STAGE_STYLE.clone());
        Self { bar }
    }

    /// Announce the next pipeline stage
    pub fn stage(&self, message: &'static str) {
        self.bar.set_message(message);
        self.bar.inc(1);
    }

    /// Finish and clear the display
    pub fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}
