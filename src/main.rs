//! toolchain - configure, build and run a CMake project
//!
//! ## Architecture
//!
//! ```text
//! CLI flags → ToolchainConfig → clean → configure → build → run
//!                                 git     cmake      cmake   executable
//! ```

mod build;
mod cli;
mod commands;
mod config;
mod error;
mod exec;
mod utils;

#[cfg(all(test, unix))]
mod test_support;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use error::{exit_code_of, ToolchainError};

fn setup_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(err) = cli.execute() {
        match err.downcast_ref::<ToolchainError>() {
            Some(e) => e.display_with_hints(),
            None => utils::terminal::print_error(&format!("{:#}", err)),
        }
        std::process::exit(exit_code_of(&err));
    }
}
