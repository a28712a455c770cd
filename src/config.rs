//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.influence.toml` files. The API key is never read from here; it comes
//! from the environment (optionally via `.env`) or `--api-key`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".influence.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Remote API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Congress members API settings, used by `--fetch-rosters`.
    #[serde(default)]
    pub congress: CongressConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding the roster and report files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Number of lookups allowed in flight.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_concurrency() -> usize {
    1
}

/// FollowTheMoney API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.followthemoney.org/".to_string()
}

fn default_timeout() -> u64 {
    10
}

/// ProPublica Congress API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CongressConfig {
    /// Base URL of the API, up to the version segment.
    #[serde(default = "default_congress_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_congress_timeout")]
    pub timeout_seconds: u64,
}

impl Default for CongressConfig {
    fn default() -> Self {
        Self {
            base_url: default_congress_base_url(),
            timeout_seconds: default_congress_timeout(),
        }
    }
}

fn default_congress_base_url() -> String {
    "https://api.propublica.org/congress/v1".to_string()
}

fn default_congress_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only when explicitly provided.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data_dir) = args.data_dir {
            self.general.data_dir = data_dir.clone();
        }
        if let Some(concurrency) = args.concurrency {
            self.general.concurrency = concurrency;
        }

        if let Some(ref base_url) = args.base_url {
            self.api.base_url = base_url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.api.timeout_seconds = timeout;
        }

        if let Some(ref base_url) = args.congress_base_url {
            self.congress.base_url = base_url.clone();
        }
    }

    /// Check merged settings before any request is made.
    pub fn validate(&self) -> Result<()> {
        if self.general.concurrency == 0 {
            bail!("general.concurrency must be at least 1");
        }

        check_endpoint("api", &self.api.base_url, self.api.timeout_seconds)?;
        check_endpoint(
            "congress",
            &self.congress.base_url,
            self.congress.timeout_seconds,
        )?;

        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

fn check_endpoint(section: &str, base_url: &str, timeout_seconds: u64) -> Result<()> {
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        bail!(
            "{}.base_url must start with 'http://' or 'https://' (got {:?})",
            section,
            base_url
        );
    }

    if timeout_seconds == 0 {
        bail!("{}.timeout_seconds must be at least 1", section);
    }

    Ok(())
}
