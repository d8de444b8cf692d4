//! Decoded record entity.
//!
//! A `Record` is what one 17-byte frame of the feed turns into. Records are
//! created only by decoding, never mutated, and serialized with `serde` when
//! the reconciled dataset is persisted.
use serde::{Deserialize, Serialize};

/// Width of the fixed symbol field.
pub const SYMBOL_LEN: usize = 4;

/// One market-style entity read from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Fixed-width instrument identifier (e.g., `MSFT`).
    pub symbol: String,
    /// Single-character side indicator, `B` or `S` on a well-behaved feed.
    pub side: String,
    /// Order quantity.
    pub quantity: i32,
    /// Price in integer ticks.
    pub price: i32,
    /// Position of the record in the logical stream; the ordering key.
    pub sequence: i32,
}

impl Record {
    /// Creates a record from its parts.
    pub fn new(symbol: &str, side: &str, quantity: i32, price: i32, sequence: i32) -> Self {
        Record {
            symbol: String::from(symbol),
            side: String::from(side),
            quantity,
            price,
            sequence,
        }
    }
}
