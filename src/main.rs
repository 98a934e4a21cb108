use clap::Parser;
use nirspec_grouper::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Success - results have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("NIRSPEC Grouper - Raw Data Set Assembler");
    println!("========================================");
    println!();
    println!("Scan a directory of Keck NIRSPEC FITS exposures and group each");
    println!("reducible science frame with its matching flats and darks.");
    println!();
    println!("USAGE:");
    println!("    nirspec-grouper <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    group       Scan a directory and assemble raw data sets (main command)");
    println!("    inspect     Print the parsed primary header of a single FITS file");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Group one night of exposures:");
    println!("    nirspec-grouper group --input /data/nirspec/2006oct03");
    println!();
    println!("    # Emit the data sets as JSON for a downstream pipeline:");
    println!("    nirspec-grouper group --input /data/nirspec/2006oct03 \\");
    println!("                          --output-format json --output-file sets.json");
    println!();
    println!("    # Look at one header:");
    println!("    nirspec-grouper inspect /data/nirspec/2006oct03/obj1.fits");
    println!();
    println!("For detailed help on any command, use:");
    println!("    nirspec-grouper <COMMAND> --help");
}
