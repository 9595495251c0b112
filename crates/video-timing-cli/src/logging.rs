use std::env;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "./logs/video-timing.log";

/// Stdout follows `TRACING_LEVEL` (default `info`). The log file follows
/// `LOG_FILE_LEVEL` (default `debug`) so every probed clip leaves a trace.
pub fn init_logger() -> WorkerGuard {
    let stdout_filter = env_filter("TRACING_LEVEL", "info");
    let file_filter = env_filter("LOG_FILE_LEVEL", "debug");

    let log_file_path = env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let log_file_path = Path::new(&log_file_path);
    let log_dir = log_file_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let log_file_name = log_file_path
        .file_name()
        .unwrap_or_else(|| OsStr::new("video-timing.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .pretty()
                .with_file(false)
                .without_time()
                .with_ansi(true)
                .with_filter(stdout_filter),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_target(false)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .init();

    info!("Logging to stdout and {}", log_file_path.display());

    guard
}

fn env_filter(var: &str, default: &str) -> EnvFilter {
    let directives = env::var(var).unwrap_or_else(|_| default.to_string());
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(default))
}
