//! Roster files produced from the Congress member listing.
//!
//! The files use the same `Name:` line format the aggregator reads, with
//! a `Party:` line after each entry.

use crate::congress::api::{CongressApi, CongressMember};
use crate::models::Chamber;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of refreshing one chamber's roster.
#[derive(Debug)]
pub struct RosterRefresh {
    pub chamber: Chamber,
    pub members: usize,
    /// `None` when the fetch failed and the existing file was kept.
    pub written: Option<PathBuf>,
}

/// Render members as roster text.
pub fn render_roster(members: &[CongressMember]) -> String {
    let mut out = String::new();

    for member in members {
        out.push_str(&format!(
            "Name: {} {}\n",
            member.first_name.as_deref().unwrap_or(""),
            member.last_name.as_deref().unwrap_or("")
        ));
        out.push_str(&format!(
            "Party: {}\n",
            member.party.as_deref().unwrap_or("N/A")
        ));
    }

    out
}

/// Write roster text, replacing any existing file.
pub fn write_roster(path: &Path, members: &[CongressMember]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    std::fs::write(path, render_roster(members))
        .with_context(|| format!("Failed to write roster to {}", path.display()))
}

/// Fetch one chamber's members and rewrite its roster file.
///
/// A failed or empty fetch is logged and leaves the existing roster alone.
/// Only a write failure is an error.
pub async fn refresh_roster(
    api: &CongressApi,
    data_dir: &Path,
    congress: u32,
    chamber: Chamber,
) -> Result<RosterRefresh> {
    let members = match api.fetch_members(congress, chamber).await {
        Ok(members) => members,
        Err(e) => {
            warn!("Failed to fetch {} members: {}", chamber, e);
            Vec::new()
        }
    };

    if members.is_empty() {
        warn!("{}: no members fetched, keeping existing roster", chamber);
        return Ok(RosterRefresh {
            chamber,
            members: 0,
            written: None,
        });
    }

    let path = data_dir.join(chamber.roster_file_name());
    write_roster(&path, &members)?;
    info!(
        "{}: wrote {} members to {}",
        chamber,
        members.len(),
        path.display()
    );

    Ok(RosterRefresh {
        chamber,
        members: members.len(),
        written: Some(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::parse_roster;
    use crate::congress::CongressSettings;
    use httpmock::prelude::*;
    use serde_json::json;

    fn member(first: &str, last: &str, party: Option<&str>) -> CongressMember {
        CongressMember {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            party: party.map(str::to_string),
        }
    }

    fn api(base_url: &str) -> CongressApi {
        CongressApi::new(CongressSettings {
            base_url: base_url.to_string(),
            api_key: "congress-key".to_string(),
            timeout_seconds: 30,
        })
        .unwrap()
    }

    #[test]
    fn test_render_roster() {
        let text = render_roster(&[
            member("Jane", "Doe", Some("D")),
            member("John", "Smith", None),
        ]);
        assert_eq!(
            text,
            "Name: Jane Doe\nParty: D\nName: John Smith\nParty: N/A\n"
        );
    }

    #[test]
    fn test_rendered_roster_feeds_aggregator() {
        let text = render_roster(&[
            member("Jane", "Doe", Some("D")),
            member("John", "Smith", Some("R")),
        ]);
        assert_eq!(parse_roster(&text), vec!["Jane Doe", "John Smith"]);
    }

    #[test]
    fn test_write_roster_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join(Chamber::House.roster_file_name());

        write_roster(&path, &[member("Jane", "Doe", Some("D"))]).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Name: Jane Doe\nParty: D\n"
        );
    }

    #[tokio::test]
    async fn test_refresh_roster_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Chamber::Senate.roster_file_name());
        std::fs::write(&path, "Name: Old Member\n").unwrap();

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/118/senate/members.json");
                then.status(200).json_body(json!({
                    "results": [{"members": [
                        {"first_name": "Jane", "last_name": "Doe", "party": "I"}
                    ]}]
                }));
            })
            .await;

        let refresh = refresh_roster(&api(&server.base_url()), dir.path(), 118, Chamber::Senate)
            .await
            .unwrap();

        assert_eq!(refresh.members, 1);
        assert_eq!(refresh.written.as_deref(), Some(path.as_path()));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Name: Jane Doe\nParty: I\n"
        );
    }

    #[tokio::test]
    async fn test_refresh_roster_keeps_file_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Chamber::House.roster_file_name());
        std::fs::write(&path, "Name: Old Member\n").unwrap();

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/118/house/members.json");
                then.status(500).body("boom");
            })
            .await;

        let refresh = refresh_roster(&api(&server.base_url()), dir.path(), 118, Chamber::House)
            .await
            .unwrap();

        assert_eq!(refresh.members, 0);
        assert!(refresh.written.is_none());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Name: Old Member\n"
        );
    }
}
