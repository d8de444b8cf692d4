//! Feed replay server.
//!
//! Generates a synthetic sequenced record feed, withholds a random share of it
//! from the fetch-all stream, and serves fetch-all and resend requests over
//! TCP until interrupted.
//!
//! Usage example (CLI):
//! ```bash
//! feed_server --port 3000 --count 200 --drop-probability 0.1
//! ```
#![warn(missing_docs)]
use clap::Parser;
use feed_common::{FeedError, Result};
use feed_common::codec::MAX_RESENDABLE_SEQUENCE;
use feed_common::net::{DEFAULT_PORT, addr};
use feed_server::{FeedBook, FeedServer};
use log::{info, warn};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Address to bind the listening socket to.
    #[clap(long, default_value = "0.0.0.0")]
    bind: String,

    /// TCP port to listen on.
    #[clap(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Number of records in the generated feed.
    #[clap(long, default_value_t = 100)]
    count: usize,

    /// Probability that a record is left out of the fetch-all stream.
    #[clap(long, default_value_t = 0.1)]
    drop_probability: f64,
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    ctrlc::set_handler(|| {
        info!("Ctrl+C received. Shutting down server...");
        std::process::exit(0);
    })
    .map_err(|e| FeedError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;

    if args.count > MAX_RESENDABLE_SEQUENCE as usize {
        warn!(
            "--count={} exceeds {}; resends for higher sequences alias onto lower ones",
            args.count, MAX_RESENDABLE_SEQUENCE
        );
    }

    let book = FeedBook::generate(args.count, args.drop_probability);
    info!(
        "Generated {} records, {} withheld from the stream",
        book.records().len(),
        book.withheld_count()
    );

    let server = FeedServer::bind(addr(&args.bind, args.port), book)?;
    server.serve()
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
