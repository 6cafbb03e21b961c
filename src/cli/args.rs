//! CLI argument definitions using clap
//!
//! Commands:
//! - catalogdb shell [--config <path>]
//! - catalogdb serve [--config <path>]
//! - catalogdb demo [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// catalogdb - An in-memory, concurrently indexed book catalog
#[derive(Parser, Debug)]
#[command(name = "catalogdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive menu-driven shell
    Shell {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Read one JSON request per stdin line, write one JSON response per line
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run a scripted walkthrough against a fresh catalog
    Demo {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
