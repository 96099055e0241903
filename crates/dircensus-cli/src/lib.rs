/// Command-line frontend — flag parsing, logging level selection, and
/// the per-path run loop.
///
/// A path that fails to index is reported and skipped; the remaining
/// paths are still processed, and the process still exits successfully.
use clap::Parser;
use dircensus_core::index::{index, IndexOptions};
use dircensus_core::model::size::{format_count, format_size};
use dircensus_core::store::{MemoryStore, StoreOptions};
use std::path::PathBuf;
use tracing::Level;

/// Index directory trees and report their sizes.
#[derive(Debug, Parser)]
#[command(name = "dircensus", version, about)]
pub struct Args {
    /// Favour compact stored size over write speed.
    #[arg(short, long)]
    pub compact: bool,

    /// Don't cross filesystem boundaries while indexing.
    #[arg(short = 'x', long)]
    pub one_file_system: bool,

    /// Only report warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show every indexed entry.
    #[arg(short, long)]
    pub verbose: bool,

    /// Paths to index, each as one complete subtree.
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

impl Args {
    /// Maximum logging level implied by the quiet/verbose flags.
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::WARN
        } else if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

/// Open a store session and index every requested path.
pub fn run(args: &Args) -> anyhow::Result<()> {
    let mut store = MemoryStore::open(StoreOptions {
        read_write: true,
        compact: args.compact,
    })?;

    let options = IndexOptions {
        one_file_system: args.one_file_system,
    };

    for path in &args.paths {
        match index(&mut store, path, options) {
            Ok(report) => println!(
                "{}: {} in {} files, {} directories",
                report.root.display(),
                format_size(report.bytes),
                format_count(report.files),
                format_count(report.directories),
            ),
            Err(err) => eprintln!("dircensus: {err}"),
        }
    }

    store.close();
    Ok(())
}
