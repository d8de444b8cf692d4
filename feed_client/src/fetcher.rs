//! Initial fetch of the whole record stream.
use feed_common::codec::{decode_record, encode_fetch_all_request};
use feed_common::{Record, Result};
use log::{debug, info, warn};

use crate::config::ClientConfig;
use crate::connection::{Connection, StreamEnd};

/// Requests every record over a single connection.
#[derive(Debug, Clone)]
pub struct StreamFetcher {
    config: ClientConfig,
}

impl StreamFetcher {
    /// Create a fetcher for the configured endpoint.
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Fetch all records, in arrival order.
    ///
    /// Fails only if the connection cannot be opened or the request cannot
    /// be written. A read error part-way through ends the fetch with whatever
    /// arrived so far. Bytes left over at the end that do not make a whole
    /// record are dropped, not kept for a later read.
    pub fn fetch_all(&self) -> Result<Vec<Record>> {
        let connection = Connection::open(&self.config)?;
        info!("Requesting all records from {}", connection.peer());
        let mut frames = connection.send_and_drain_all(&encode_fetch_all_request())?;

        let mut records = Vec::new();
        for frame in frames.by_ref() {
            match decode_record(&frame) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping undecodable frame: {}", e),
            }
        }

        match frames.end() {
            Some(StreamEnd::Failed(kind)) => warn!(
                "Stream ended early after {} records ({:?}); continuing with what arrived",
                records.len(),
                kind
            ),
            _ => debug!("Stream closed by peer"),
        }
        if frames.discarded() > 0 {
            warn!(
                "Discarded {} trailing bytes that did not form a whole record",
                frames.discarded()
            );
        }

        info!("Fetched {} records", records.len());
        Ok(records)
    }
}
