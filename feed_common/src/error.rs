//! Error types shared between client and server.
//!
//! The `FeedError` enum unifies the failure cases of the wire codec, the TCP
//! transport, gap reconciliation and persistence, allowing every crate in the
//! workspace to propagate a single error type.
use std::io;

use thiserror::Error;

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum FeedError {
    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Fewer bytes than a whole record frame were available for decoding.
    /// The bytes are discarded, never partially interpreted.
    #[error("Malformed record: expected {expected} bytes, got {actual}")]
    MalformedRecord {
        /// Width of a record frame.
        expected: usize,
        /// Bytes actually supplied.
        actual: usize,
    },

    /// A request frame that is too short or carries an unknown call type.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// The transport to the given endpoint could not be established.
    #[error("Failed to connect to {addr}: {source}")]
    Connection {
        /// Endpoint that was dialled, as `host:port`.
        addr: String,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },

    /// Fetch-all produced no records, so there is nothing to reconcile.
    #[error("Empty dataset: the initial fetch returned no records")]
    EmptyDataset,

    /// A configuration value was rejected before any connection was made.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl FeedError {
    /// Wraps a connect failure together with the endpoint it was aimed at.
    pub fn connection(addr: impl Into<String>, source: io::Error) -> Self {
        FeedError::Connection {
            addr: addr.into(),
            source,
        }
    }
}
