//! Command implementations for the grouper CLI
//!
//! Contains the command execution logic, logging setup, and console
//! reporting for the CLI interface.

use crate::cli::args::{Args, Commands, GroupArgs, InspectArgs, OutputFormat};
use crate::config::InstrumentConfig;
use crate::discovery;
use crate::error::Result;
use crate::fits;
use crate::grouper::DataSetBuilder;
use crate::models::{GroupingStats, RawDataSet};
use crate::report::{MemorySink, Severity};
use colored::*;
use indicatif::HumanDuration;
use std::fs;
use std::time::Instant;
use tracing::{debug, error, info};

/// Main command runner for the grouper
///
/// Dispatches to the appropriate subcommand handler based on CLI args.
pub fn run(args: Args) -> Result<GroupingStats> {
    match args.get_command() {
        Commands::Group(group_args) => run_group(group_args),
        Commands::Inspect(inspect_args) => run_inspect(inspect_args),
    }
}

/// Execute the full scan-and-group workflow
pub fn run_group(args: GroupArgs) -> Result<GroupingStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet);

    info!("starting NIRSPEC exposure grouping");
    debug!("command line arguments: {:?}", args);

    args.validate()?;

    if args.show_summary() {
        println!("{}", "Scanning NIRSPEC exposures".bright_green().bold());
        println!("  {} {}", "Input:".bright_cyan(), args.input_dir.display());
    }

    let headers = discovery::collect_headers(&args.input_dir)?;

    let config = InstrumentConfig::default();
    config.validate()?;

    // Capture diagnostics so the run statistics can count them, then
    // forward each to the log.
    let mut sink = MemorySink::new();
    let builder = DataSetBuilder::new(config);
    let data_sets = builder.build(&headers, &mut sink)?;

    for diagnostic in &sink.diagnostics {
        match diagnostic.severity {
            Severity::Info => info!("{}", diagnostic.message),
            Severity::Critical => error!("{}", diagnostic.message),
        }
    }

    let dropped_no_flats = sink
        .diagnostics
        .iter()
        .filter(|d| d.message.contains("no matching flat field"))
        .count();
    let rejected_objects = sink
        .diagnostics
        .iter()
        .filter(|d| d.message.contains("wrong dispersion mode"))
        .count();

    let stats = GroupingStats {
        files_scanned: headers.len(),
        object_frames: data_sets.len() + dropped_no_flats,
        rejected_objects,
        data_sets: data_sets.len(),
        dropped_no_flats,
        processing_time_ms: start_time.elapsed().as_millis(),
    };

    match args.output_format {
        OutputFormat::Human => {
            if args.show_summary() {
                print_data_sets(&data_sets);
            }
        }
        OutputFormat::Json => write_json(&data_sets, &args)?,
    }

    if args.show_summary() {
        println!(
            "\n{} {} raw data set(s) from {} file(s) in {}",
            "Assembled".bright_green().bold(),
            stats.data_sets.to_string().bright_white().bold(),
            stats.files_scanned.to_string().bright_white().bold(),
            HumanDuration(start_time.elapsed())
        );
    }

    Ok(stats)
}

/// Print the parsed primary header of a single FITS file
pub fn run_inspect(args: InspectArgs) -> Result<GroupingStats> {
    setup_logging(args.get_log_level(), false);

    args.validate()?;

    let header = fits::read_header(&args.file)?;

    println!("{}", args.file.display().to_string().bright_cyan());
    for (keyword, value) in header.iter() {
        println!("{:<8} = {}", keyword, value);
    }

    Ok(GroupingStats {
        files_scanned: 1,
        ..GroupingStats::default()
    })
}

/// Set up structured logging on stderr
fn setup_logging(log_level: &str, quiet: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nirspec_grouper={}", log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    // A second initialization in the same process must not panic
    let result = if quiet {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if result.is_ok() {
        debug!("logging initialized at level: {}", log_level);
    }
}

fn print_data_sets(data_sets: &[RawDataSet]) {
    for data_set in data_sets {
        println!(
            "\n{} {}",
            "Object:".bright_cyan(),
            data_set.object_file.bright_white().bold()
        );
        println!("  {} ({})", "Flats".bright_cyan(), data_set.flat_files.len());
        for flat in &data_set.flat_files {
            println!("    {}", flat);
        }
        println!("  {} ({})", "Darks".bright_cyan(), data_set.dark_files.len());
        for dark in &data_set.dark_files {
            println!("    {}", dark);
        }
    }
}

fn write_json(data_sets: &[RawDataSet], args: &GroupArgs) -> Result<()> {
    let json = serde_json::to_string_pretty(data_sets)?;

    match &args.output_file {
        Some(path) => {
            fs::write(path, json)?;
            info!(
                "wrote {} data set(s) to {}",
                data_sets.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
