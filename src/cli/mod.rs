//! CLI module for catalogdb
//!
//! Provides command-line front ends over one in-memory catalog:
//! - shell: Interactive numbered menu
//! - serve: JSON request/response lines over stdin/stdout
//! - demo: Scripted walkthrough

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{demo, run, run_command, serve, shell, split_authors, Request};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{prompt, read_line, render_books, write_error, write_response};
