//! Merging the fetched and resent records into the final ordered dataset.
use std::collections::BTreeMap;

use clap::ValueEnum;
use feed_common::Record;
use strum_macros::Display;

/// What to do when two records share a sequence number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep every record; duplicates sit next to each other.
    #[default]
    KeepAll,
    /// Keep only the last record seen for each sequence, resends last.
    LastWins,
}

/// Concatenate `initial` and `resent` and sort by sequence.
///
/// Duplicates are kept. The sort is stable, so records with the same
/// sequence stay in `initial`-then-`resent` order.
pub fn assemble(initial: Vec<Record>, resent: Vec<Record>) -> Vec<Record> {
    assemble_with(initial, resent, DuplicatePolicy::KeepAll)
}

/// [`assemble`] with an explicit duplicate policy.
pub fn assemble_with(
    mut initial: Vec<Record>,
    resent: Vec<Record>,
    policy: DuplicatePolicy,
) -> Vec<Record> {
    initial.extend(resent);
    match policy {
        DuplicatePolicy::KeepAll => {
            initial.sort_by_key(|r| r.sequence);
            initial
        }
        DuplicatePolicy::LastWins => {
            let mut by_sequence = BTreeMap::new();
            for record in initial {
                by_sequence.insert(record.sequence, record);
            }
            by_sequence.into_values().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(sequence: i32, quantity: i32) -> Record {
        Record::new("TSLA", "B", quantity, 2_500, sequence)
    }

    fn sequences(records: &[Record]) -> Vec<i32> {
        records.iter().map(|r| r.sequence).collect()
    }

    #[test]
    fn merges_and_sorts() {
        let out = assemble(vec![rec(5, 1), rec(1, 1), rec(4, 1)], vec![rec(3, 1), rec(2, 1)]);
        assert_eq!(sequences(&out), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn output_is_sorted_for_any_input_order() {
        let orders: [&[i32]; 4] = [&[3, 1, 2], &[9, 7, 8, 1], &[], &[2, 2, 1]];
        for initial in orders {
            for resent in orders {
                let out = assemble(
                    initial.iter().map(|&s| rec(s, 0)).collect(),
                    resent.iter().map(|&s| rec(s, 0)).collect(),
                );
                assert_eq!(out.len(), initial.len() + resent.len());
                assert!(out.windows(2).all(|w| w[0].sequence <= w[1].sequence));
            }
        }
    }

    #[test]
    fn keeps_duplicates_by_default() {
        let out = assemble(vec![rec(1, 10), rec(2, 10)], vec![rec(2, 20)]);
        assert_eq!(sequences(&out), vec![1, 2, 2]);
        assert_eq!(out[1].quantity, 10);
        assert_eq!(out[2].quantity, 20);
    }

    #[test]
    fn last_wins_keeps_resent_copy() {
        let out = assemble_with(
            vec![rec(2, 10), rec(1, 10), rec(2, 11)],
            vec![rec(2, 20)],
            DuplicatePolicy::LastWins,
        );
        assert_eq!(sequences(&out), vec![1, 2]);
        assert_eq!(out[1].quantity, 20);
    }

    #[test]
    fn policy_names() {
        assert_eq!(DuplicatePolicy::KeepAll.to_string(), "keep-all");
        assert_eq!(DuplicatePolicy::LastWins.to_string(), "last-wins");
    }
}
