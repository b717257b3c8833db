//! Upload progress reporting.

/// Receives progress updates from long-running store operations.
pub trait UploadProgress {
    /// Called after each batch commit attempt. `done` counts writes that
    /// have been attempted so far, committed or not.
    fn on_batch(&self, done: usize, total: usize, committed: bool);

    /// Called when a phase starts (e.g., "Uploading 1200 records to locations").
    fn on_phase(&self, message: &str);

    /// Called when the operation is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl UploadProgress for SilentProgress {
    fn on_batch(&self, _done: usize, _total: usize, _committed: bool) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl UploadProgress for LogProgress {
    fn on_batch(&self, done: usize, total: usize, committed: bool) {
        if committed {
            log::info!("  [{}/{}] batch committed", done, total);
        } else {
            log::warn!("  [{}/{}] batch failed", done, total);
        }
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
