//! Feed Client — pulls every record from a sequenced feed over TCP, re-requests
//! the sequence numbers that never arrived, and writes the merged records in
//! sequence order to a JSON file.
//!
//! Usage example (CLI):
//! ```bash
//! feed_client --host 127.0.0.1 --port 3000 --output ./packets.json
//! ```
//!
//! Sequences that no resend could recover are reported but do not fail the
//! run; only an empty initial fetch (or an unreachable feed) does.
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use feed_client::{ClientConfig, JsonFileSink, pipeline};
use feed_common::{FeedError, Result};
use log::{error, info, warn};
use std::path::PathBuf;

fn main() -> Result<(), FeedError> {
    init_logger();
    let args = Args::parse();
    let config = ClientConfig::try_from(&args)?;
    let output = normalize_path(&args.output);

    info!("Reading feed at {}", config.endpoint());
    let mut sink = JsonFileSink::new(&output);
    match pipeline::run(&config, &mut sink) {
        Ok(summary) => {
            if !summary.unfilled.is_empty() {
                warn!(
                    "{} sequences could not be recovered: {:?}",
                    summary.unfilled.len(),
                    summary.unfilled
                );
            }
            info!(
                "Fetched {}, recovered {} of {} missing; all {} records written to {}",
                summary.fetched,
                summary.recovered,
                summary.missing,
                summary.written,
                output.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {}", e);
            Err(e)
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
