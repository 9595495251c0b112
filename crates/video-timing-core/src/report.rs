use crate::error::Error;
use crate::timing::TimeWindow;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const REPORT_FILE_SUFFIX: &str = "_VideoFilenames_Metadata.csv";

/// Header row. The first cell is the unnamed row-index column.
pub const REPORT_HEADER: [&str; 4] = ["", "Filename", "Start_Datetime", "End_Datetime"];

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub file_name: String,
    pub start_datetime: String,
    pub end_datetime: String,
    pub skipped: bool,
}

impl ReportRow {
    pub fn new(file_name: impl Into<String>, window: &TimeWindow) -> Self {
        Self {
            file_name: file_name.into(),
            start_datetime: window.start_string(),
            end_datetime: window.end_string(),
            skipped: false,
        }
    }

    /// A file that could not be processed; both datetime cells stay empty.
    pub fn skipped(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            start_datetime: String::new(),
            end_datetime: String::new(),
            skipped: true,
        }
    }
}

/// All rows of one trip, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub trip_id: String,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn new(trip_id: impl Into<String>) -> Self {
        Self {
            trip_id: trip_id.into(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    pub fn file_name(&self) -> String {
        report_file_name(&self.trip_id)
    }

    pub fn skipped_count(&self) -> usize {
        self.rows.iter().filter(|row| row.skipped).count()
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(REPORT_HEADER)?;
        for (index, row) in self.rows.iter().enumerate() {
            wtr.write_record([
                index.to_string().as_str(),
                row.file_name.as_str(),
                row.start_datetime.as_str(),
                row.end_datetime.as_str(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Writes `<output_dir>/<trip>_VideoFilenames_Metadata.csv`, replacing
    /// any previous report for the trip.
    pub fn write_csv(&self, output_dir: &Path) -> Result<PathBuf, Error> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(self.file_name());
        let file = fs::File::create(&path)?;
        self.write_to(file)?;
        info!("Wrote {} rows to {}", self.rows.len(), path.display());
        Ok(path)
    }
}

pub fn report_file_name(trip_id: &str) -> String {
    format!("{}{}", trip_id, REPORT_FILE_SUFFIX)
}
