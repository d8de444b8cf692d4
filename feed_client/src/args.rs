//! Command-line arguments for the feed client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::time::Duration;

use clap::Parser;
use feed_client::sink::DEFAULT_OUTPUT;
use feed_client::{ClientConfig, DuplicatePolicy};
use feed_common::net::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_HOST, DEFAULT_IO_TIMEOUT, DEFAULT_PORT};
use feed_common::{FeedError, Result};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Host name or IP address of the feed server.
    #[clap(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// TCP port of the feed server.
    #[clap(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Path of the JSON file the ordered records are written to.
    #[clap(long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Deadline for establishing each connection, in milliseconds.
    #[clap(long, default_value_t = DEFAULT_CONNECT_TIMEOUT.as_millis() as u64)]
    pub connect_timeout_ms: u64,

    /// Deadline for each read or write, in milliseconds.
    #[clap(long, default_value_t = DEFAULT_IO_TIMEOUT.as_millis() as u64)]
    pub io_timeout_ms: u64,

    /// How records sharing a sequence number are treated.
    #[clap(long, value_enum, default_value_t = DuplicatePolicy::KeepAll)]
    pub duplicates: DuplicatePolicy,
}

impl TryFrom<&Args> for ClientConfig {
    type Error = FeedError;

    fn try_from(args: &Args) -> Result<Self> {
        let host = args.host.trim().replace('"', "");
        let config = ClientConfig::new(&host, args.port)
            .with_timeouts(
                Duration::from_millis(args.connect_timeout_ms),
                Duration::from_millis(args.io_timeout_ms),
            )
            .with_duplicates(args.duplicates);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_default_config() {
        let args = Args::parse_from(["feed_client"]);
        assert_eq!(args.output, "packets.json");
        assert_eq!(ClientConfig::try_from(&args).unwrap(), ClientConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "feed_client",
            "--host",
            "\"10.0.0.7\"",
            "--port",
            "4000",
            "--io-timeout-ms",
            "250",
            "--duplicates",
            "last-wins",
        ]);
        let config = ClientConfig::try_from(&args).unwrap();
        assert_eq!(config.endpoint(), "10.0.0.7:4000");
        assert_eq!(config.io_timeout, Duration::from_millis(250));
        assert_eq!(config.duplicates, DuplicatePolicy::LastWins);
    }

    #[test]
    fn zero_port_is_rejected() {
        let args = Args::parse_from(["feed_client", "--port", "0"]);
        assert!(matches!(
            ClientConfig::try_from(&args),
            Err(FeedError::InvalidConfig(_))
        ));
    }
}
