//! catalogdb CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`, prints errors to stderr,
//! and exits non-zero on failure. No other logic lives here.

use catalogdb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
