use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Filename '{file}' does not match the naming convention: {reason}")]
    Format { file: String, reason: String },

    #[error("Duration probe failed for '{file}': {reason}")]
    Probe { file: String, reason: String },

    #[error("Invalid start timestamp '{token}' in '{file}': {reason}")]
    TimeParse {
        file: String,
        token: String,
        reason: String,
    },

    #[error("No video files found in {dir}")]
    EmptyDirectory { dir: String },

    #[error("'{file}' belongs to trip '{second}' but the directory already holds trip '{first}'")]
    MixedTrips {
        first: String,
        second: String,
        file: String,
    },

    #[error("{skipped} of {total} files skipped; partial report written to {}", .report.display())]
    Skipped {
        skipped: usize,
        total: usize,
        report: PathBuf,
    },
}

impl Error {
    /// The input file this error is attached to, if any.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Error::Format { file, .. }
            | Error::Probe { file, .. }
            | Error::TimeParse { file, .. }
            | Error::MixedTrips { file, .. } => Some(file.as_str()),
            _ => None,
        }
    }
}
