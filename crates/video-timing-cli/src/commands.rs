use clap::{Args, Parser, Subcommand};
use video_timing_core::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(name = "video-timing")]
#[command(about = "Start and end times for survey video clips", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub paths: PathArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Probe every clip and write the trip's metadata CSV
    Process,
    /// Validate file names in the video directory without probing
    Check,
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct PathArgs {
    /// Directory holding the trip's video files
    #[arg(long, global = true)]
    pub video_path: Option<String>,

    /// Directory the CSV report is written to
    #[arg(long, global = true)]
    pub output_path: Option<String>,

    /// ffprobe executable
    #[arg(long = "ffprobe", global = true)]
    pub ffprobe_path: Option<String>,

    /// Seconds before a single probe is killed
    #[arg(long = "timeout-secs", global = true)]
    pub probe_timeout_secs: Option<u64>,

    /// Mark failing files in the report instead of stopping at the first one
    #[arg(long, global = true)]
    pub keep_going: bool,
}

impl PathArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            video_path: self.video_path.clone(),
            output_path: self.output_path.clone(),
            ffprobe_path: self.ffprobe_path.clone(),
            probe_timeout_secs: self.probe_timeout_secs,
            keep_going: self.keep_going,
        }
    }
}
