//! Data models for the finance report.
//!
//! This module contains the core data structures shared by the lookup
//! client, the aggregator and the report writer.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::PathBuf;

/// Legislative chamber a roster belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chamber {
    /// House of Representatives (office code `H`)
    House,
    /// Senate (office code `S`)
    Senate,
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chamber::House => write!(f, "House"),
            Chamber::Senate => write!(f, "Senate"),
        }
    }
}

impl Chamber {
    /// Processing order for a full run: house first, then senate.
    pub const ALL: [Chamber; 2] = [Chamber::House, Chamber::Senate];

    /// Office filter sent to the remote search endpoint.
    pub fn office_code(&self) -> &'static str {
        match self {
            Chamber::House => "H",
            Chamber::Senate => "S",
        }
    }

    /// Lowercase designation used in file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Chamber::House => "house",
            Chamber::Senate => "senate",
        }
    }

    /// Name of the roster file read for this chamber.
    pub fn roster_file_name(&self) -> String {
        format!("{}_member_contributions.txt", self.slug())
    }

    /// Name of the report file written for this chamber.
    pub fn report_file_name(&self) -> String {
        format!("{}_member_contributions_with_finance.txt", self.slug())
    }
}

/// One result returned by the candidate search endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContributionRecord {
    /// Candidate first name, if the service provided one.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Candidate last name, if the service provided one.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Contribution amount in dollars.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: f64,
}

impl ContributionRecord {
    #[cfg(test)]
    pub fn new(first_name: &str, last_name: &str, amount: f64) -> Self {
        Self {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            amount,
        }
    }

    /// `first_name + " " + last_name`, with missing parts treated as empty.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
    }
}

/// The service sends amounts as numbers, but numeric strings and nulls
/// show up in older records.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    match Option::<RawAmount>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(RawAmount::Number(n)) => Ok(n),
        Some(RawAmount::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {:?}", s))),
    }
}

/// Aggregated contributions for one roster member.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSummary {
    /// Name as it appears in the roster.
    pub name: String,
    /// Sum of matched amounts (zero when nothing matched).
    pub financial_contributions: f64,
}

impl MemberSummary {
    pub fn new(name: impl Into<String>, financial_contributions: f64) -> Self {
        Self {
            name: name.into(),
            financial_contributions,
        }
    }
}

/// Statistics for one processed chamber.
#[derive(Debug, Clone)]
pub struct ChamberOutcome {
    /// Chamber that was processed.
    pub chamber: Chamber,
    /// Number of member summaries written.
    pub members: usize,
    /// Lookups that failed and were counted as zero.
    pub lookups_failed: usize,
    /// Sum over all members.
    pub total_contributions: f64,
    /// Where the report was written.
    pub output_path: PathBuf,
}

impl ChamberOutcome {
    /// Build an outcome from the summaries of a finished chamber.
    pub fn from_summaries(
        chamber: Chamber,
        summaries: &[MemberSummary],
        lookups_failed: usize,
        output_path: PathBuf,
    ) -> Self {
        Self {
            chamber,
            members: summaries.len(),
            lookups_failed,
            total_contributions: summaries
                .iter()
                .fold(0.0, |acc, s| acc + s.financial_contributions),
            output_path,
        }
    }
}
