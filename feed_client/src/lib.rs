//! Gap-filling client for the sequenced record feed.
//!
//! The client pulls the whole record stream over one TCP connection, works out
//! which sequence numbers in `[1, max]` never arrived, asks for each of them
//! on a fresh connection, and writes the merged, sequence-ordered result:
//!
//! - `connection` — one request/response exchange per TCP connection.
//! - `fetcher` — the initial fetch-all.
//! - `gap` — missing-sequence detection and resends.
//! - `assembler` — merge and sort, with an optional duplicate policy.
//! - `sink` — persistence of the final dataset.
//! - `pipeline` — the above wired together.
#![warn(missing_docs)]
pub mod assembler;
pub mod config;
pub mod connection;
pub mod fetcher;
pub mod gap;
pub mod pipeline;
pub mod sink;

pub use assembler::{DuplicatePolicy, assemble, assemble_with};
pub use config::ClientConfig;
pub use connection::{Connection, FrameStream, StreamEnd};
pub use fetcher::StreamFetcher;
pub use gap::{GapFiller, compute_missing};
pub use pipeline::{RunSummary, run};
pub use sink::{JsonFileSink, RecordSink};
