//! Shared networking constants and helpers used by client and server.

use std::time::Duration;

/// Host the client dials when none is configured.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// TCP port of the record feed.
pub const DEFAULT_PORT: u16 = 3000;
/// Deadline for establishing a TCP connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Deadline for any single read or write on an established connection.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Helper to format a host and a port like "host:port".
///
/// IPv6 literals are wrapped in brackets so the result stays parseable.
pub fn addr(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}
