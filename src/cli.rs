//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation. Every flag is optional: a bare invocation
//! processes both chambers with the configured defaults.

use crate::models::Chamber;
use clap::Parser;
use std::path::PathBuf;

/// Influence Finance - campaign-finance totals for legislators
///
/// Reads the house and senate rosters, looks every member up in the
/// FollowTheMoney API and writes a contributions report per chamber.
///
/// Examples:
///   influence-finance
///   influence-finance --data-dir ./data --chamber senate
///   influence-finance --dry-run
///   influence-finance --fetch-rosters 118
///   influence-finance --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the roster files and receiving the reports
    #[arg(long, value_name = "DIR", env = "INFLUENCE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// FollowTheMoney API key
    ///
    /// Usually provided through FOLLOWTHEMONEY_API_KEY, optionally from a local .env file.
    #[arg(long, value_name = "KEY", env = "FOLLOWTHEMONEY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the FollowTheMoney API
    #[arg(long, value_name = "URL", env = "FTM_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (default: 10)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Which chamber(s) to process
    #[arg(long, default_value = "both", value_name = "CHAMBER")]
    pub chamber: ChamberSelection,

    /// Number of lookups allowed in flight (default: 1, sequential)
    #[arg(long, value_name = "NUM")]
    pub concurrency: Option<usize>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .influence.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Parse the rosters and list members without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .influence.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Refresh the roster files from the ProPublica Congress API for the
    /// given congress number, then exit
    #[arg(long, value_name = "CONGRESS")]
    pub fetch_rosters: Option<u32>,

    /// ProPublica Congress API key (used by --fetch-rosters)
    #[arg(
        long,
        value_name = "KEY",
        env = "PROPUBLICA_CONGRESS_API_KEY",
        hide_env_values = true
    )]
    pub congress_api_key: Option<String>,

    /// Base URL of the ProPublica Congress API
    #[arg(long, value_name = "URL", env = "PROPUBLICA_CONGRESS_BASE_URL")]
    pub congress_base_url: Option<String>,
}

/// Chamber filter for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ChamberSelection {
    House,
    Senate,
    /// House first, then senate (default)
    #[default]
    Both,
}

impl ChamberSelection {
    /// Chambers to process, in processing order.
    pub fn chambers(&self) -> Vec<Chamber> {
        match self {
            ChamberSelection::House => vec![Chamber::House],
            ChamberSelection::Senate => vec![Chamber::Senate],
            ChamberSelection::Both => Chamber::ALL.to_vec(),
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        for base_url in [&self.base_url, &self.congress_base_url].into_iter().flatten() {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err("Base URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err("Concurrency must be at least 1".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(congress) = self.fetch_rosters {
            if congress == 0 {
                return Err("Congress number must be at least 1".to_string());
            }
            if self.dry_run {
                return Err("Cannot use both --fetch-rosters and --dry-run".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            data_dir: None,
            api_key: Some("key".to_string()),
            base_url: None,
            timeout: None,
            chamber: ChamberSelection::Both,
            concurrency: None,
            config: None,
            verbose: false,
            quiet: false,
            dry_run: false,
            init_config: false,
            fetch_rosters: None,
            congress_api_key: None,
            congress_base_url: None,
        }
    }

    #[test]
    fn test_no_arguments_is_valid() {
        let args = Args::try_parse_from(["influence-finance"]).unwrap();
        assert_eq!(args.chamber, ChamberSelection::Both);
        assert!(!args.dry_run);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_chamber_selection_order() {
        assert_eq!(
            ChamberSelection::Both.chambers(),
            vec![Chamber::House, Chamber::Senate]
        );
        assert_eq!(ChamberSelection::Senate.chambers(), vec![Chamber::Senate]);

        let args = Args::try_parse_from(["influence-finance", "--chamber", "house"]).unwrap();
        assert_eq!(args.chamber.chambers(), vec![Chamber::House]);
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut args = make_args();
        args.base_url = Some("api.followthemoney.org".to_string());
        assert!(args.validate().is_err());

        args.base_url = Some("http://localhost:9000".to_string());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_values() {
        let mut args = make_args();
        args.timeout = Some(0);
        assert!(args.validate().is_err());

        let mut args = make_args();
        args.concurrency = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_fetch_rosters() {
        let args = Args::try_parse_from(["influence-finance", "--fetch-rosters", "118"]).unwrap();
        assert_eq!(args.fetch_rosters, Some(118));
        assert!(args.validate().is_ok());

        let mut args = make_args();
        args.fetch_rosters = Some(0);
        assert!(args.validate().is_err());

        args.fetch_rosters = Some(118);
        args.dry_run = true;
        assert!(args.validate().is_err());

        let mut args = make_args();
        args.congress_base_url = Some("api.propublica.org".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
