//! CLI module for shelfdb
//!
//! Provides the command-line interface:
//! - demo: seed the books collection and run the fixed sequence
//! - explain: seed and explain one indexed query

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{demo, explain, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}
