//! Domain models for the replay server.
//!
//! - `symbol` — four-letter ticker symbols used for synthetic records.
//! - `feed_book` — the served record set and its withholding rules.

pub mod feed_book;
pub mod symbol;
