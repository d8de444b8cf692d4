//! Fetch, reconcile and persist in one run.
use std::collections::HashSet;

use feed_common::Result;
use log::info;

use crate::assembler::assemble_with;
use crate::config::ClientConfig;
use crate::fetcher::StreamFetcher;
use crate::gap::{GapFiller, compute_missing};
use crate::sink::RecordSink;

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Records received from the fetch-all stream.
    pub fetched: usize,
    /// Sequences found missing after the fetch.
    pub missing: usize,
    /// Records received from resends.
    pub recovered: usize,
    /// Missing sequences no resend filled.
    pub unfilled: Vec<i32>,
    /// Records handed to the sink.
    pub written: usize,
}

/// Run the whole client against the configured feed and persist the result.
///
/// Aborts with [`feed_common::FeedError::EmptyDataset`] before any resend if
/// the fetch returned nothing. Unfilled gaps do not fail the run.
pub fn run<S: RecordSink + ?Sized>(config: &ClientConfig, sink: &mut S) -> Result<RunSummary> {
    config.validate()?;

    let initial = StreamFetcher::new(config.clone()).fetch_all()?;
    let fetched = initial.len();
    let missing = compute_missing(&initial)?;
    info!("{} sequences missing after fetching {} records", missing.len(), fetched);

    let resent = GapFiller::new(config.clone()).fill_gaps(&missing);
    let returned: HashSet<i32> = resent.iter().map(|r| r.sequence).collect();
    let unfilled: Vec<i32> = missing
        .iter()
        .copied()
        .filter(|s| !returned.contains(s))
        .collect();
    let recovered = resent.len();

    let records = assemble_with(initial, resent, config.duplicates);
    sink.persist(&records)?;

    Ok(RunSummary {
        fetched,
        missing: missing.len(),
        recovered,
        unfilled,
        written: records.len(),
    })
}
