mod commands;
mod logging;
mod progress;

use std::process;

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use video_timing_core::{AppConfig, BatchEngine};
use tracing::{error, info};

fn main() {
    dotenv().ok();

    let guard = logging::init_logger();

    let args = Cli::parse();

    let Some(command) = args.command else {
        let _ = Cli::command().print_long_help();
        return;
    };

    let config = match video_timing_core::config::load_configuration(&args.paths.overrides()) {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            drop(guard);
            process::exit(1);
        }
    };

    let outcome = match command {
        Commands::Process => run_process(&config),
        Commands::Check => run_check(&config),
        Commands::PrintConfig => {
            println!("Configuration: {:#?}", config);
            Ok(())
        }
    };

    if let Err(err) = outcome {
        error!("Error: {:#}", err);
        drop(guard);
        process::exit(1);
    }
}

fn run_process(config: &AppConfig) -> anyhow::Result<()> {
    let engine = BatchEngine::from_config(config);
    let reporter = CliReporter::new();
    info!(
        "Processing {} into {}",
        config.video_path, config.output_path
    );

    let result = engine
        .run(&reporter)
        .with_context(|| format!("processing {}", config.video_path))?;

    println!();
    info!(
        "Trip {}: {} clips, report {} in {}",
        result.report.trip_id.cyan(),
        format!("{}", result.total_files).green(),
        result.report_path.display().to_string().cyan(),
        format!("{:.2}s", result.duration.as_secs_f64()).green(),
    );

    Ok(())
}

fn run_check(config: &AppConfig) -> anyhow::Result<()> {
    let engine = BatchEngine::from_config(config);
    let checks = engine
        .check()
        .with_context(|| format!("checking {}", engine.video_dir().display()))?;

    let mut invalid = 0usize;
    for check in &checks {
        match &check.outcome {
            Ok(record) => println!(
                "{} {}  trip={} dive={} start={}{}",
                "ok ".green(),
                check.file_name,
                record.trip_id,
                record.dive_id,
                record.start_token,
                if record.overlaid { " (overlaid)" } else { "" },
            ),
            Err(err) => {
                invalid += 1;
                println!("{} {}  {}", "bad".red(), check.file_name, err);
            }
        }
    }

    if invalid > 0 {
        bail!("{} of {} file names are invalid", invalid, checks.len());
    }
    info!("All {} file names are valid", checks.len());
    Ok(())
}
