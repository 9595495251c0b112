use std::path::Path;

/// Trait for reporting batch progress.
///
/// The CLI implements it with an indicatif bar. All methods default to no-ops.
pub trait ProgressReporter: Send + Sync {
    fn on_batch_start(&self, _total_files: usize) {}
    fn on_file_start(&self, _index: usize, _file_name: &str) {}
    fn on_file_complete(&self, _index: usize, _file_name: &str) {}
    fn on_file_skipped(&self, _index: usize, _file_name: &str, _reason: &str) {}
    fn on_report_written(&self, _rows: usize, _path: &Path) {}
    fn on_batch_complete(&self, _rows: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
