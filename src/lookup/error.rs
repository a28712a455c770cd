//! Remote request failure taxonomy.

use thiserror::Error;

/// Why a single remote request failed.
///
/// None of these abort a run. A failed candidate search counts as no
/// contributions; a failed member fetch leaves the existing roster alone.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("cannot connect to {base_url}: {source}")]
    Connect {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode search results: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl LookupError {
    /// Classify a transport-level reqwest failure.
    pub fn from_transport(e: reqwest::Error, base_url: &str, timeout_seconds: u64) -> Self {
        if e.is_timeout() {
            LookupError::Timeout {
                seconds: timeout_seconds,
            }
        } else if e.is_connect() {
            LookupError::Connect {
                base_url: base_url.to_string(),
                source: e,
            }
        } else {
            LookupError::Request(e)
        }
    }
}
