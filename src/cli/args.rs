//! Command-line argument definitions for the NIRSPEC grouper
//!
//! This module defines the CLI interface using the clap derive API.

use crate::error::{GrouperError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the NIRSPEC exposure grouper
///
/// Scans a directory of NIRSPEC FITS exposures and groups each reducible
/// science frame with the flat field and dark frames that match it.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nirspec-grouper",
    version,
    about = "Group NIRSPEC FITS exposures into raw data sets for reduction",
    long_about = "Scans a directory tree of Keck NIRSPEC FITS exposures, decompresses gzipped \
                  files in place, and assembles raw data sets: one high-dispersion science \
                  exposure plus the flat field frames sharing its optical configuration and \
                  the dark frames sharing its exposure time."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the grouper
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Scan a directory of FITS exposures and group them into raw data sets
    Group(GroupArgs),
    /// Print the parsed primary header of a single FITS file
    Inspect(InspectArgs),
}

/// Arguments for the group command (main grouping workflow)
#[derive(Debug, Clone, Parser)]
pub struct GroupArgs {
    /// Input directory containing FITS exposures
    ///
    /// Searched recursively. Files whose name contains "fits" are read;
    /// gzipped files are decompressed in place first.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Input directory containing FITS exposures"
    )]
    pub input_dir: PathBuf,

    /// Output format for the assembled data sets
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Output file for machine-readable results
    ///
    /// If not specified, outputs to stdout
    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "FILE",
        help = "Output file for machine-readable results"
    )]
    pub output_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the inspect command (header dump)
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// FITS file whose primary header should be printed
    #[arg(value_name = "FILE", help = "FITS file to inspect")]
    pub file: PathBuf,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl GroupArgs {
    /// Validate the group command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.exists() {
            return Err(GrouperError::configuration(format!(
                "Input path does not exist: {}",
                self.input_dir.display()
            )));
        }

        if !self.input_dir.is_dir() {
            return Err(GrouperError::configuration(format!(
                "Input path is not a directory: {}",
                self.input_dir.display()
            )));
        }

        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(GrouperError::configuration(format!(
                        "Output file directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if the console summary should be printed (not in quiet mode)
    pub fn show_summary(&self) -> bool {
        !self.quiet
    }
}

impl InspectArgs {
    /// Validate the inspect command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.file.is_file() {
            return Err(GrouperError::configuration(format!(
                "File does not exist: {}",
                self.file.display()
            )));
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn group_args(input_dir: PathBuf) -> GroupArgs {
        GroupArgs {
            input_dir,
            output_format: OutputFormat::Human,
            output_file: None,
            verbose: 0,
            quiet: false,
        }
    }

    #[test]
    fn test_group_args_validation() {
        let temp_dir = TempDir::new().unwrap();

        let args = group_args(temp_dir.path().to_path_buf());
        assert!(args.validate().is_ok());

        // Nonexistent input path
        let args = group_args(PathBuf::from("/nonexistent/night"));
        assert!(args.validate().is_err());

        // Input path that is a file, not a directory
        let file_path = temp_dir.path().join("obj1.fits");
        std::fs::write(&file_path, "x").unwrap();
        let args = group_args(file_path);
        assert!(args.validate().is_err());

        // Output file in a missing directory
        let mut args = group_args(temp_dir.path().to_path_buf());
        args.output_file = Some(temp_dir.path().join("missing").join("out.json"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_group_log_level() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = group_args(temp_dir.path().to_path_buf());

        assert_eq!(args.get_log_level(), "info");

        args.verbose = 1;
        assert_eq!(args.get_log_level(), "debug");

        args.verbose = 2;
        assert_eq!(args.get_log_level(), "trace");

        args.verbose = 0;
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_summary());
    }

    #[test]
    fn test_command_parsing() {
        let args = Args::parse_from(["nirspec-grouper", "group", "--input", "/tmp"]);
        assert!(matches!(args.command, Some(Commands::Group(_))));

        let args = Args::parse_from(["nirspec-grouper", "inspect", "/tmp/obj1.fits"]);
        match args.get_command() {
            Commands::Inspect(inspect) => {
                assert_eq!(inspect.file, PathBuf::from("/tmp/obj1.fits"));
            }
            _ => panic!("expected inspect command"),
        }

        let args = Args::parse_from(["nirspec-grouper"]);
        assert!(args.command.is_none());
    }
}
