//! Process-level entry helpers: argument parsing and error exit.

use clap::Parser;

use crate::core::cli::CliArgs;

/// Print an application error with its context chain and exit with code 1.
pub fn handle_error(error: anyhow::Error) -> ! {
    eprintln!();
    eprintln!("Error running glyphmath:");
    eprintln!("{error}");
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}

/// Parse command line arguments.
pub fn get_cli_args() -> CliArgs {
    CliArgs::parse()
}
