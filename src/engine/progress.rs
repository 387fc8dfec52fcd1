//! Progress bar utilities for displaying export status

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

// Progress bar type alias
pub type ProgressBar = Arc<Mutex<Bar>>;

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: &'static str,
    pub animation: Animation,
}

impl ProgressBarConfig {
    /// Create a new progress bar configuration
    pub fn new(total: usize, desc: &'static str, animation: Animation) -> Self {
        Self {
            total,
            desc,
            animation,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation,
        unit = " files"
    )))
}

/// Progress bar over `total` export operations, or None when not requested or nothing to do.
pub fn export_progress_bar(enabled: bool, total: usize) -> Option<ProgressBar> {
    (enabled && total > 0)
        .then(|| create_progress_bar(ProgressBarConfig::new(total, "Exporting", Animation::Classic)))
}

/// Update progress bar if available
/// Uses try_lock to avoid blocking if mutex is contended (non-blocking)
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    // If lock is contended, skip update (progress bar will catch up on finish)
    if let Ok(mut pb) = pb.try_lock() {
        let _ = pb.update(n);
    }
}

/// Push the bar to its total and end the line.
pub fn finish_progress_bar(pb: &ProgressBar) {
    if let Ok(mut bar) = pb.lock() {
        let total = bar.total;
        let _ = bar.update_to(total);
        let _ = bar.refresh();
        eprintln!();
    }
}
