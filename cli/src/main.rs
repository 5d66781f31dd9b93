#![deny(missing_docs)]

//! # Route Guard CLI
//!
//! Injects a prisma availability check at the top of the `try` block of
//! exported route handlers. Run without arguments to patch the built-in
//! route list under the current directory.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;
use crate::patch::ConsoleReporter;

mod discover;
mod error;
mod patch;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Guard route handlers against a missing database client")]
struct Cli {
    #[clap(flatten)]
    patch: patch::PatchArgs,

    /// Log diagnostic detail to stderr (overridden by RUST_LOG).
    #[clap(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    patch::execute(&cli.patch, &mut ConsoleReporter)?;
    Ok(())
}
