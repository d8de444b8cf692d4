//! Client configuration threaded through every component.

use std::time::Duration;

use feed_common::net::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_HOST, DEFAULT_IO_TIMEOUT, DEFAULT_PORT, addr};
use feed_common::{FeedError, Result};

use crate::assembler::DuplicatePolicy;

/// Endpoint, deadlines and assembly policy for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Host name or IP address of the feed.
    pub host: String,
    /// TCP port of the feed.
    pub port: u16,
    /// Deadline for establishing each connection.
    pub connect_timeout: Duration,
    /// Deadline for each individual read or write.
    pub io_timeout: Duration,
    /// How the assembler treats repeated sequence numbers.
    pub duplicates: DuplicatePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            io_timeout: DEFAULT_IO_TIMEOUT,
            duplicates: DuplicatePolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration for `host:port` with default deadlines.
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: String::from(host),
            port,
            ..Self::default()
        }
    }

    /// Same configuration with both deadlines replaced.
    pub fn with_timeouts(mut self, connect_timeout: Duration, io_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.io_timeout = io_timeout;
        self
    }

    /// Same configuration with another duplicate policy.
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// The endpoint as `host:port`.
    pub fn endpoint(&self) -> String {
        addr(&self.host, self.port)
    }

    /// Rejects values that could never produce a working connection.
    ///
    /// Zero deadlines are refused because the socket layer treats them as
    /// invalid rather than as "no deadline".
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(FeedError::InvalidConfig(String::from("host must not be empty")));
        }
        if self.port == 0 {
            return Err(FeedError::InvalidConfig(String::from("port must not be 0")));
        }
        if self.connect_timeout.is_zero() || self.io_timeout.is_zero() {
            return Err(FeedError::InvalidConfig(String::from(
                "timeouts must be greater than zero",
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_feed() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint(), "127.0.0.1:3000");
        assert_eq!(config.duplicates, DuplicatePolicy::KeepAll);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unusable_values() {
        assert!(ClientConfig::new("", 3000).validate().is_err());
        assert!(ClientConfig::new("localhost", 0).validate().is_err());
        let zero = ClientConfig::new("localhost", 3000)
            .with_timeouts(Duration::ZERO, Duration::from_secs(1));
        assert!(matches!(zero.validate(), Err(FeedError::InvalidConfig(_))));
    }
}
