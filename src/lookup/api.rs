//! HTTP source for the `candidate.search.list` endpoint.

use crate::lookup::LookupError;
use crate::models::{Chamber, ContributionRecord};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Where candidate search results come from.
///
/// Returns every record the source knows for `name`, unfiltered.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn search(
        &self,
        name: &str,
        chamber: Chamber,
    ) -> std::result::Result<Vec<ContributionRecord>, LookupError>;
}

/// Settings for the FollowTheMoney API.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout_seconds: u64,
}

/// reqwest-backed candidate search.
pub struct FollowTheMoneyApi {
    settings: ApiSettings,
    http_client: reqwest::Client,
}

impl FollowTheMoneyApi {
    /// Create a client with the configured per-request timeout.
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            settings,
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/candidate.search.list",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    /// Build the GET request for one candidate search.
    pub fn build_request(
        &self,
        name: &str,
        chamber: Chamber,
    ) -> std::result::Result<reqwest::Request, LookupError> {
        let request = self
            .http_client
            .get(self.endpoint())
            .query(&[
                ("apikey", self.settings.api_key.as_str()),
                ("search", name),
                ("format", "json"),
                ("office", chamber.office_code()),
            ])
            .build()?;

        Ok(request)
    }

    fn classify(&self, e: reqwest::Error) -> LookupError {
        LookupError::from_transport(e, &self.settings.base_url, self.settings.timeout_seconds)
    }
}

#[async_trait]
impl CandidateSource for FollowTheMoneyApi {
    async fn search(
        &self,
        name: &str,
        chamber: Chamber,
    ) -> std::result::Result<Vec<ContributionRecord>, LookupError> {
        let request = self.build_request(name, chamber)?;
        debug!("Searching {} candidates for {:?}", chamber, name);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&bytes).map_err(LookupError::Decode)
    }
}
