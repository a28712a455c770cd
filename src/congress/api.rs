//! HTTP client for the Congress `members.json` endpoint.

use crate::lookup::LookupError;
use crate::models::Chamber;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Settings for the ProPublica Congress API.
#[derive(Debug, Clone)]
pub struct CongressSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout_seconds: u64,
}

/// One member as listed by the members endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CongressMember {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MembersResponse {
    #[serde(default)]
    results: Vec<MembersResult>,
}

#[derive(Debug, Deserialize)]
struct MembersResult {
    #[serde(default)]
    members: Vec<CongressMember>,
}

/// reqwest-backed member listing.
pub struct CongressApi {
    settings: CongressSettings,
    http_client: reqwest::Client,
}

impl CongressApi {
    pub fn new(settings: CongressSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            settings,
            http_client,
        })
    }

    fn members_url(&self, congress: u32, chamber: Chamber) -> String {
        format!(
            "{}/{}/{}/members.json",
            self.settings.base_url.trim_end_matches('/'),
            congress,
            chamber.slug()
        )
    }

    /// Build the GET request listing one chamber's members.
    pub fn build_request(
        &self,
        congress: u32,
        chamber: Chamber,
    ) -> std::result::Result<reqwest::Request, LookupError> {
        let request = self
            .http_client
            .get(self.members_url(congress, chamber))
            .header("X-API-Key", &self.settings.api_key)
            .build()?;

        Ok(request)
    }

    /// Members of `chamber` in the given congress.
    ///
    /// Only the first result set is read; a body without one yields no members.
    pub async fn fetch_members(
        &self,
        congress: u32,
        chamber: Chamber,
    ) -> std::result::Result<Vec<CongressMember>, LookupError> {
        let request = self.build_request(congress, chamber)?;
        debug!("Fetching {} members of congress {}", chamber, congress);

        let response = self.http_client.execute(request).await.map_err(|e| {
            LookupError::from_transport(e, &self.settings.base_url, self.settings.timeout_seconds)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            LookupError::from_transport(e, &self.settings.base_url, self.settings.timeout_seconds)
        })?;
        let parsed: MembersResponse = serde_json::from_slice(&bytes).map_err(LookupError::Decode)?;

        Ok(parsed
            .results
            .into_iter()
            .next()
            .map(|result| result.members)
            .unwrap_or_default())
    }
}
