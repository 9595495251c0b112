use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Mutex;
use video_timing_core::ProgressReporter;

/// Single progress bar over the probe loop, one tick per clip.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                f(pb);
            }
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_batch_start(&self, total_files: usize) {
        let pb = ProgressBar::new(total_files as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "  {spinner:.cyan} Probing [{bar:30.cyan/dim}] {pos}/{len} clips {wide_msg}",
        ) {
            pb.set_style(
                style
                    .progress_chars("━╸─")
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            );
        }
        pb.enable_steady_tick(std::time::Duration::from_millis(80));

        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.replace(pb) {
                old.finish_and_clear();
            }
        }
    }

    fn on_file_start(&self, _index: usize, file_name: &str) {
        let name = file_name.to_string();
        self.with_bar(|pb| pb.set_message(name));
    }

    fn on_file_complete(&self, _index: usize, _file_name: &str) {
        self.with_bar(|pb| pb.inc(1));
    }

    fn on_file_skipped(&self, _index: usize, file_name: &str, reason: &str) {
        let line = format!("  \x1b[33m!\x1b[0m Skipped {}: {}", file_name, reason);
        self.with_bar(|pb| {
            pb.println(line);
            pb.inc(1);
        });
    }

    fn on_report_written(&self, rows: usize, path: &Path) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Report written: {} rows to {}",
            rows,
            path.display()
        );
    }
}

impl Drop for CliReporter {
    fn drop(&mut self) {
        self.finish_bar();
    }
}
