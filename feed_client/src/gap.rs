//! Gap detection and resend-driven filling.
use std::collections::{BTreeSet, HashSet};

use feed_common::codec::{MAX_RESENDABLE_SEQUENCE, decode_record, encode_resend_request};
use feed_common::{FeedError, Record, Result};
use log::{debug, info, warn};

use crate::config::ClientConfig;
use crate::connection::Connection;

/// Sequences in `[1, max]` that no record in `records` carries.
///
/// Fails with [`FeedError::EmptyDataset`] when `records` is empty, since
/// there is no upper bound to reconcile against.
pub fn compute_missing(records: &[Record]) -> Result<BTreeSet<i32>> {
    let max_seq = records
        .iter()
        .map(|r| r.sequence)
        .max()
        .ok_or(FeedError::EmptyDataset)?;
    let observed: HashSet<i32> = records.iter().map(|r| r.sequence).collect();
    Ok((1..=max_seq).filter(|s| !observed.contains(s)).collect())
}

/// Asks the feed for missing records one at a time.
#[derive(Debug, Clone)]
pub struct GapFiller {
    config: ClientConfig,
}

impl GapFiller {
    /// Create a gap filler for the configured endpoint.
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Resend every sequence in `missing`, ascending, one connection each.
    ///
    /// A sequence for which nothing comes back stays missing; it is logged
    /// and never retried.
    pub fn fill_gaps(&self, missing: &BTreeSet<i32>) -> Vec<Record> {
        info!("Requesting {} missing sequences", missing.len());
        if missing.len() > MAX_RESENDABLE_SEQUENCE as usize {
            warn!(
                "{} sequences missing; more than the resend field can address, \
                 the maximum sequence may be corrupt",
                missing.len()
            );
        }
        let mut recovered = Vec::new();
        for &sequence in missing {
            match self.resend(sequence) {
                Ok(Some(record)) => {
                    if record.sequence != sequence {
                        warn!(
                            "Resend of sequence {} returned sequence {}",
                            sequence, record.sequence
                        );
                    }
                    debug!("Recovered sequence {}", record.sequence);
                    recovered.push(record);
                }
                Ok(None) => warn!("No record returned for sequence {}; it stays missing", sequence),
                Err(e) => warn!("Resend of sequence {} failed: {}", sequence, e),
            }
        }
        info!("Recovered {} of {} missing records", recovered.len(), missing.len());
        recovered
    }

    fn resend(&self, sequence: i32) -> Result<Option<Record>> {
        if !(0..=MAX_RESENDABLE_SEQUENCE).contains(&sequence) {
            warn!(
                "Sequence {} does not fit the one-byte resend field and is requested as {}",
                sequence,
                encode_resend_request(sequence)[1]
            );
        }
        let connection = Connection::open(&self.config)?;
        let frame = connection.send_and_read_one(&encode_resend_request(sequence))?;
        frame.map(|f| decode_record(&f)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(sequences: &[i32]) -> Vec<Record> {
        sequences
            .iter()
            .map(|&s| Record::new("NVDA", "S", 5, 900, s))
            .collect()
    }

    #[test]
    fn finds_interior_gaps() {
        let missing = compute_missing(&records(&[5, 1, 2, 4])).unwrap();
        assert_eq!(missing, BTreeSet::from([3]));
    }

    #[test]
    fn leading_gaps_count_from_one() {
        let missing = compute_missing(&records(&[4, 6])).unwrap();
        assert_eq!(missing, BTreeSet::from([1, 2, 3, 5]));
    }

    #[test]
    fn contiguous_input_has_no_gaps() {
        assert!(compute_missing(&records(&[1, 2, 3])).unwrap().is_empty());
    }

    #[test]
    fn duplicates_do_not_hide_gaps() {
        let missing = compute_missing(&records(&[1, 1, 3, 3])).unwrap();
        assert_eq!(missing, BTreeSet::from([2]));
    }

    #[test]
    fn non_positive_maximum_has_no_gaps() {
        assert!(compute_missing(&records(&[0, -4])).unwrap().is_empty());
    }

    #[test]
    fn distant_maximum_counts_every_gap() {
        let missing = compute_missing(&records(&[1, 100_000])).unwrap();
        assert_eq!(missing.len(), 99_998);
        assert_eq!(missing.first(), Some(&2));
        assert_eq!(missing.last(), Some(&99_999));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(compute_missing(&[]), Err(FeedError::EmptyDataset)));
    }

    #[test]
    fn unreachable_feed_leaves_gaps_open() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let filler = GapFiller::new(ClientConfig::new("127.0.0.1", port));
        assert!(filler.fill_gaps(&BTreeSet::from([1, 2])).is_empty());
    }
}
