//! dircensus — disk usage indexer.
//!
//! Thin binary entry point. All logic lives in the `dircensus-core`
//! and `dircensus-cli` crates.

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = dircensus_cli::Args::parse();

    // Initialise structured logging before any engine work so the first
    // warning from the walker is never dropped.
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .init();

    dircensus_cli::run(&args)
}
