//! Candidate lookup against the FollowTheMoney API.
//!
//! This module provides the HTTP source for candidate searches and the
//! soft-failing client that filters results down to exact name matches.

pub mod api;
pub mod client;
pub mod error;

pub use api::{ApiSettings, CandidateSource, FollowTheMoneyApi};
pub use client::LookupClient;
pub use error::LookupError;

#[cfg(test)]
pub mod testing {
    //! In-memory candidate source for tests.

    use super::{CandidateSource, LookupError};
    use crate::models::{Chamber, ContributionRecord};
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct StubSource {
        records: HashMap<String, Vec<ContributionRecord>>,
        failures: HashSet<String>,
        pub calls: Mutex<Vec<(String, Chamber)>>,
    }

    impl StubSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_records(mut self, name: &str, records: Vec<ContributionRecord>) -> Self {
            self.records.insert(name.to_string(), records);
            self
        }

        pub fn with_failure(mut self, name: &str) -> Self {
            self.failures.insert(name.to_string());
            self
        }
    }

    #[async_trait]
    impl CandidateSource for StubSource {
        async fn search(
            &self,
            name: &str,
            chamber: Chamber,
        ) -> Result<Vec<ContributionRecord>, LookupError> {
            self.calls
                .lock()
                .unwrap()
                .push((name.to_string(), chamber));

            if self.failures.contains(name) {
                return Err(LookupError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }

            Ok(self.records.get(name).cloned().unwrap_or_default())
        }
    }
}
