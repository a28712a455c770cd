//! Soft-failing lookup client with exact name matching.

use crate::lookup::{CandidateSource, LookupError};
use crate::models::{Chamber, ContributionRecord};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

/// Whether a record belongs to `name`.
///
/// Compares `first_name + " " + last_name` with the input name,
/// case-insensitively and exactly. No substring or token matching.
pub fn matches_name(record: &ContributionRecord, name: &str) -> bool {
    record.full_name().to_lowercase() == name.to_lowercase()
}

/// Looks up a member's contribution records.
pub struct LookupClient<S> {
    source: S,
    failed_lookups: AtomicUsize,
}

impl<S: CandidateSource> LookupClient<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            failed_lookups: AtomicUsize::new(0),
        }
    }

    /// Search and keep only the records matching `name`.
    pub async fn try_lookup(
        &self,
        name: &str,
        chamber: Chamber,
    ) -> Result<Vec<ContributionRecord>, LookupError> {
        let records = self.source.search(name, chamber).await?;
        let returned = records.len();

        let matched: Vec<ContributionRecord> = records
            .into_iter()
            .filter(|record| matches_name(record, name))
            .collect();

        debug!(
            "{}: {} of {} records matched {:?}",
            chamber,
            matched.len(),
            returned,
            name
        );

        Ok(matched)
    }

    /// Like [`try_lookup`](Self::try_lookup), but a failure is logged,
    /// counted and reported as no records.
    pub async fn lookup(&self, name: &str, chamber: Chamber) -> Vec<ContributionRecord> {
        match self.try_lookup(name, chamber).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Lookup failed for {} ({}): {}", name, chamber, e);
                self.failed_lookups.fetch_add(1, Ordering::Relaxed);
                Vec::new()
            }
        }
    }

    /// Number of lookups that have failed so far.
    pub fn failed_lookups(&self) -> usize {
        self.failed_lookups.load(Ordering::Relaxed)
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }
}
