//! Replay server for the sequenced record feed.
//!
//! The server speaks the same 2-byte request / 17-byte record protocol as a
//! production feed and serves records from an in-memory [`FeedBook`]. It is
//! used to run the client locally and as the counterpart in end-to-end tests:
//!
//! - `FeedBook` — records plus rules for withholding some of them from the
//!   fetch-all stream, refusing some resends and appending trailing bytes.
//! - `FeedServer` — a blocking TCP accept loop answering one request per
//!   connection on its own thread.
#![warn(missing_docs)]
pub mod model;
mod receiver;

pub use model::feed_book::FeedBook;
pub use model::symbol::Symbol;
pub use receiver::FeedServer;
