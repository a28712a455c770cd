//! Roster parsing and contribution aggregation.
//!
//! This module extracts member names from roster text, looks each one up
//! and sums the matching contribution amounts.

use crate::lookup::{CandidateSource, LookupClient};
use crate::models::{Chamber, ContributionRecord, MemberSummary};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Marker that identifies a roster entry line.
pub const NAME_MARKER: &str = "Name:";

/// Options for a single aggregation pass.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Maximum lookups in flight. 1 means strictly sequential.
    pub concurrency: usize,
    /// Show a progress bar on stderr.
    pub show_progress: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            show_progress: false,
        }
    }
}

/// Extract member names from roster text, in order.
///
/// A line is an entry iff it contains `Name:`; the name is whatever
/// follows the first marker, trimmed.
pub fn parse_roster(roster_text: &str) -> Vec<String> {
    roster_text
        .lines()
        .filter_map(|line| line.split_once(NAME_MARKER))
        .map(|(_, rest)| rest.trim().to_string())
        .collect()
}

/// Sum the `amount` field over a set of records.
///
/// Folds from a positive zero; an empty `f64` sum is `-0.0` and prints as `-0`.
pub fn sum_amounts(records: &[ContributionRecord]) -> f64 {
    records.iter().fold(0.0, |acc, r| acc + r.amount)
}

/// Build one summary per roster entry, in roster order.
///
/// Failed lookups count as zero; no entry is ever dropped.
pub async fn aggregate<S: CandidateSource>(
    client: &LookupClient<S>,
    roster_text: &str,
    chamber: Chamber,
    options: &AggregateOptions,
) -> Vec<MemberSummary> {
    let names = parse_roster(roster_text);
    info!("{}: {} roster entries", chamber, names.len());

    let progress = create_progress_bar(names.len() as u64, chamber, options.show_progress);
    let pb = &progress;

    let summaries: Vec<MemberSummary> = stream::iter(names)
        .map(move |name| async move {
            let records = client.lookup(&name, chamber).await;
            pb.inc(1);
            let total = sum_amounts(&records);
            MemberSummary::new(name, total)
        })
        .buffered(options.concurrency.max(1))
        .collect()
        .await;

    progress.finish_and_clear();
    summaries
}

fn create_progress_bar(len: u64, chamber: Chamber, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(chamber.to_string());
    pb
}
