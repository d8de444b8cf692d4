//! In-memory record set served by the replay server.
//!
//! A `FeedBook` knows which records exist, which of them are left out of the
//! fetch-all stream, and which cannot be resent. Together these rules let a
//! test or a demo reproduce every situation the client has to reconcile:
//! gaps that a resend fills, gaps that stay open, and a stream that ends on a
//! partial frame.

use std::collections::HashSet;

use feed_common::Record;
use feed_common::codec::{Frame, encode_record, resend_key};
use rand::Rng;
use strum::IntoEnumIterator;

use crate::model::symbol::Symbol;

/// Records plus the rules for serving them.
#[derive(Debug, Clone, Default)]
pub struct FeedBook {
    records: Vec<Record>,
    withheld: HashSet<i32>,
    unavailable: HashSet<i32>,
    trailing: Vec<u8>,
}

impl FeedBook {
    /// Create a book from `records`, kept in ascending sequence order.
    pub fn new(mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.sequence);
        Self {
            records,
            ..Self::default()
        }
    }

    /// Leave these sequences out of the fetch-all stream.
    pub fn withhold_from_stream(mut self, sequences: impl IntoIterator<Item = i32>) -> Self {
        self.withheld.extend(sequences);
        self
    }

    /// Answer resend requests for these sequences with nothing.
    pub fn refuse_resend(mut self, sequences: impl IntoIterator<Item = i32>) -> Self {
        self.unavailable.extend(sequences);
        self
    }

    /// Append raw bytes after the last record of the fetch-all stream.
    pub fn with_trailing_bytes(mut self, bytes: &[u8]) -> Self {
        self.trailing = bytes.to_vec();
        self
    }

    /// Generate `count` synthetic records with sequences `1..=count`.
    ///
    /// Each record is withheld from the stream with `drop_probability`
    /// (clamped to `[0, 1]`, NaN treated as `0`); withheld records stay
    /// available for resend.
    pub fn generate(count: usize, drop_probability: f64) -> Self {
        let mut rng = rand::rng();
        let symbols: Vec<Symbol> = Symbol::iter().collect();
        let drop_probability = if drop_probability.is_nan() {
            0.0
        } else {
            drop_probability.clamp(0.0, 1.0)
        };

        let mut records = Vec::with_capacity(count);
        let mut withheld = Vec::new();
        let mut price: i32 = 10_000;
        for sequence in (1..=count).map(|s| s as i32) {
            let symbol = symbols[rng.random_range(0..symbols.len())];
            let side = if rng.random_bool(0.5) { "B" } else { "S" };
            price = (price + rng.random_range(-100..=100)).max(1);
            let quantity = 10 * rng.random_range(1..=100);
            records.push(Record::new(&symbol.to_string(), side, quantity, price, sequence));
            if rng.random_bool(drop_probability) {
                withheld.push(sequence);
            }
        }
        Self::new(records).withhold_from_stream(withheld)
    }

    /// All records, in sequence order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records the fetch-all stream leaves out.
    pub fn withheld_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| self.withheld.contains(&r.sequence))
            .count()
    }

    /// Bytes written in answer to a fetch-all request.
    pub fn stream_bytes(&self) -> Vec<u8> {
        let mut out: Vec<u8> = self
            .records
            .iter()
            .filter(|r| !self.withheld.contains(&r.sequence))
            .flat_map(encode_record)
            .collect();
        out.extend_from_slice(&self.trailing);
        out
    }

    /// Frame sent in answer to a resend request carrying `key`.
    ///
    /// The first record whose sequence maps onto `key` wins, mirroring the
    /// one-byte resend parameter of the protocol.
    pub fn resend(&self, key: u8) -> Option<Frame> {
        self.records
            .iter()
            .filter(|r| !self.unavailable.contains(&r.sequence))
            .find(|r| resend_key(r.sequence) == key)
            .map(encode_record)
    }
}
