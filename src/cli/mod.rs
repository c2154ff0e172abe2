// CLI module
// Command-line arguments and the maintenance commands they select

mod args;
mod commands;

pub use args::{CliArgs, Command};
pub use commands::run;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails, or `--help` is given, clap prints the error or help
/// text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
