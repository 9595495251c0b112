use crate::config::{AppConfig, BatchPolicy};
use crate::error::Error;
use crate::listing;
use crate::naming::{self, VideoFileRecord};
use crate::probe::{DurationProbe, FfprobeProber};
use crate::progress::ProgressReporter;
use crate::report::{Report, ReportRow};
use crate::timing::{self, TimeWindow};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

pub struct BatchEngine<P: DurationProbe> {
    video_dir: PathBuf,
    output_dir: PathBuf,
    ignore_patterns: Vec<String>,
    policy: BatchPolicy,
    prober: P,
}

#[derive(Debug)]
pub struct BatchResult {
    pub report: Report,
    pub report_path: PathBuf,
    pub total_files: usize,
    pub duration: Duration,
}

/// Outcome of validating one name without probing it.
#[derive(Debug)]
pub struct NameCheck {
    pub file_name: String,
    pub outcome: Result<VideoFileRecord, Error>,
}

impl BatchEngine<FfprobeProber> {
    pub fn from_config(config: &AppConfig) -> Self {
        let prober = FfprobeProber::new(&config.ffprobe_path, config.probe_timeout());
        Self::new(&config.video_path, &config.output_path, prober)
            .with_ignore_patterns(config.ignore_patterns.clone())
            .with_policy(config.batch_policy)
    }
}

impl<P: DurationProbe> BatchEngine<P> {
    pub fn new(video_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, prober: P) -> Self {
        Self {
            video_dir: video_dir.into(),
            output_dir: output_dir.into(),
            ignore_patterns: Vec::new(),
            policy: BatchPolicy::FailFast,
            prober,
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn with_policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn video_dir(&self) -> &Path {
        &self.video_dir
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    /// Candidate file names in listing order. An empty directory is an error.
    pub fn list(&self) -> Result<Vec<String>, Error> {
        let names = listing::list_video_files(&self.video_dir, &self.ignore_patterns)?;
        if names.is_empty() {
            return Err(Error::EmptyDirectory {
                dir: self.video_dir.display().to_string(),
            });
        }
        info!(
            "Found {} video files in {}",
            names.len(),
            self.video_dir.display()
        );
        Ok(names)
    }

    /// Full pass: list, parse, probe, derive, then write the report.
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<BatchResult, Error> {
        let started = Instant::now();
        let names = self.list()?;
        let report = self.build_report(&names, reporter)?;

        let report_path = report.write_csv(&self.output_dir)?;
        reporter.on_report_written(report.rows.len(), &report_path);

        let skipped = report.skipped_count();
        if skipped > 0 {
            return Err(Error::Skipped {
                skipped,
                total: names.len(),
                report: report_path,
            });
        }

        let duration = started.elapsed();
        reporter.on_batch_complete(report.rows.len(), duration.as_secs_f64());
        Ok(BatchResult {
            report,
            report_path,
            total_files: names.len(),
            duration,
        })
    }

    /// Processes `file_names` in order. One probe call per file.
    pub fn build_report(
        &self,
        file_names: &[String],
        reporter: &dyn ProgressReporter,
    ) -> Result<Report, Error> {
        reporter.on_batch_start(file_names.len());

        let mut trip_id: Option<String> = None;
        let mut rows: Vec<ReportRow> = Vec::with_capacity(file_names.len());
        let mut first_error: Option<Error> = None;

        for (index, file_name) in file_names.iter().enumerate() {
            reporter.on_file_start(index, file_name);

            match self.process_file(file_name, &mut trip_id) {
                Ok(window) => {
                    rows.push(ReportRow::new(file_name.as_str(), &window));
                    reporter.on_file_complete(index, file_name);
                }
                Err(err @ Error::MixedTrips { .. }) => {
                    error!("Aborting batch at {}: {}", file_name, err);
                    return Err(err);
                }
                Err(err) => match self.policy {
                    BatchPolicy::FailFast => {
                        error!("Aborting batch at {}: {}", file_name, err);
                        return Err(err);
                    }
                    BatchPolicy::SkipInvalid => {
                        warn!("Skipping {}: {}", file_name, err);
                        reporter.on_file_skipped(index, file_name, &err.to_string());
                        rows.push(ReportRow::skipped(file_name.as_str()));
                        first_error.get_or_insert(err);
                    }
                },
            }
        }

        // A trip id alone is not enough: at least one clip must have a window.
        if rows.iter().all(|row| row.skipped) {
            return Err(first_error.unwrap_or_else(|| Error::EmptyDirectory {
                dir: self.video_dir.display().to_string(),
            }));
        }
        let trip_id = trip_id.ok_or_else(|| Error::EmptyDirectory {
            dir: self.video_dir.display().to_string(),
        })?;

        let mut report = Report::new(trip_id);
        for row in rows {
            report.push(row);
        }
        Ok(report)
    }

    fn process_file(
        &self,
        file_name: &str,
        trip_id: &mut Option<String>,
    ) -> Result<TimeWindow, Error> {
        let record = naming::parse_file_name(file_name)?;

        let first = trip_id.get_or_insert_with(|| record.trip_id.clone());
        if *first != record.trip_id {
            return Err(Error::MixedTrips {
                first: first.clone(),
                second: record.trip_id,
                file: file_name.to_string(),
            });
        }

        let duration = self.prober.probe(&self.video_dir.join(file_name))?;
        let window = TimeWindow::derive(&record, duration)?;
        debug!(
            "{}: trip {} dive {} start {} end {} ({}s probed)",
            file_name,
            record.trip_id,
            record.dive_id,
            window.start_string(),
            window.end_string(),
            duration
        );
        Ok(window)
    }

    /// Validates every name and start token without running the probe.
    pub fn check(&self) -> Result<Vec<NameCheck>, Error> {
        let names = self.list()?;
        Ok(names
            .into_iter()
            .map(|file_name| {
                let outcome = naming::parse_file_name(&file_name).and_then(|record| {
                    timing::parse_start_token(&record.file_name, &record.start_token)?;
                    Ok(record)
                });
                NameCheck { file_name, outcome }
            })
            .collect())
    }
}
