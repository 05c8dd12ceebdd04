//! CLI argument definitions using clap
//!
//! Commands:
//! - shelfdb demo [--uri <uri>]
//! - shelfdb explain [--uri <uri>]

use clap::{Parser, Subcommand};

/// shelfdb - a small, deterministic document-collection facade
#[derive(Parser, Debug)]
#[command(name = "shelfdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seed the books collection and run the fixed demo sequence
    Demo {
        /// Store URI (overrides SHELFDB_URI)
        #[arg(long)]
        uri: Option<String>,
    },

    /// Seed the books collection and explain one indexed query
    Explain {
        /// Store URI (overrides SHELFDB_URI)
        #[arg(long)]
        uri: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
