//! Start and end times for survey video clips, recovered from their file
//! names and probed durations, written out as one CSV report per trip.

pub mod config;
pub mod engine;
pub mod error;
pub mod listing;
pub mod naming;
pub mod probe;
pub mod progress;
pub mod report;
pub mod timing;

pub use self::config::{AppConfig, BatchPolicy, ConfigOverrides};
pub use engine::{BatchEngine, BatchResult, NameCheck};
pub use error::Error;
pub use naming::{parse_file_name, VideoFileRecord};
pub use probe::{DurationProbe, FfprobeProber};
pub use progress::{ProgressReporter, SilentReporter};
pub use report::{Report, ReportRow};
pub use timing::TimeWindow;
