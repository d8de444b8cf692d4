//!
//! Common types and utilities shared by the feed server and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `FeedError` used across the workspace.
//! - `result` — handy `Result<T, FeedError>` alias.
//! - `record` — the decoded `Record` entity.
//! - `codec` — request/record framing for the binary wire protocol.
//! - `net` — networking defaults and small helpers.
#![warn(missing_docs)]
pub mod codec;
pub mod error;
pub mod net;
pub mod record;
pub mod result;

pub use error::FeedError;
pub use record::Record;
pub use result::Result;
