//! Influence Finance - campaign-finance totals for legislators
//!
//! Reads a roster per chamber, looks each member up in the FollowTheMoney
//! API, sums the matching contributions and writes a text report per
//! chamber next to the roster. With `--fetch-rosters` it instead rewrites
//! the rosters from the ProPublica Congress API.
//!
//! Exit codes:
//!   0 - Success (individual lookup failures are logged and counted as zero)
//!   1 - Fatal error (missing roster, unwritable report or roster, missing API key, bad config)

mod analysis;
mod cli;
mod config;
mod congress;
mod lookup;
mod models;
mod report;

use analysis::AggregateOptions;
use anyhow::{Context, Result};
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use congress::{CongressApi, CongressSettings};
use lookup::{ApiSettings, CandidateSource, FollowTheMoneyApi, LookupClient};
use models::{Chamber, ChamberOutcome};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Populate the environment from a local, untracked .env (if any)
    // before clap reads env-backed flags.
    dotenvy::dotenv().ok();

    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("Influence Finance v{}", env!("CARGO_PKG_VERSION"));
    debug!("Chambers: {:?}, dry run: {}", args.chamber, args.dry_run);

    if let Err(e) = run(args).await {
        error!("Run failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .influence.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Process every selected chamber, in order.
async fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    let data_dir = config.general.data_dir.clone();
    let chambers = args.chamber.chambers();

    if let Some(congress_number) = args.fetch_rosters {
        return handle_fetch_rosters(&args, &config, congress_number, &chambers).await;
    }

    if args.dry_run {
        return handle_dry_run(&data_dir, &chambers);
    }

    let api_key = args
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .context("FOLLOWTHEMONEY_API_KEY is not set (export it or add it to .env)")?;

    let api = FollowTheMoneyApi::new(ApiSettings {
        base_url: config.api.base_url.clone(),
        api_key,
        timeout_seconds: config.api.timeout_seconds,
    })?;
    let client = LookupClient::new(api);

    let options = AggregateOptions {
        concurrency: config.general.concurrency,
        show_progress: !args.quiet,
    };

    println!("💰 Fetching campaign-finance data");
    println!("   API: {}", config.api.base_url);
    println!("   Data: {}", data_dir.display());
    println!("   Timeout: {}s", config.api.timeout_seconds);

    let mut outcomes = Vec::new();
    for chamber in chambers {
        println!("\n🏛️  Processing {} roster...", chamber);
        outcomes.push(process_chamber(&client, &data_dir, chamber, &options).await?);
    }

    println!("\n📊 Summary:");
    for outcome in &outcomes {
        println!(
            "   {}: {} members, ${} total, {} failed lookups -> {}",
            outcome.chamber,
            outcome.members,
            outcome.total_contributions,
            outcome.lookups_failed,
            outcome.output_path.display()
        );
    }
    println!("   Duration: {:.1}s", start_time.elapsed().as_secs_f64());
    println!("\n✅ Done!");

    Ok(())
}

/// Read, aggregate and write the report for one chamber.
async fn process_chamber<S: CandidateSource>(
    client: &LookupClient<S>,
    data_dir: &Path,
    chamber: Chamber,
    options: &AggregateOptions,
) -> Result<ChamberOutcome> {
    let roster_text = read_roster(data_dir, chamber)?;
    let failed_before = client.failed_lookups();

    let summaries = analysis::aggregate(client, &roster_text, chamber, options).await;

    let lookups_failed = client.failed_lookups() - failed_before;
    if lookups_failed > 0 {
        warn!(
            "{}: {} lookups failed and were counted as $0",
            chamber, lookups_failed
        );
    }

    let output_path = report::report_path(data_dir, chamber);
    report::write_report(&output_path, &summaries)?;
    info!(
        "{}: wrote {} members to {}",
        chamber,
        summaries.len(),
        output_path.display()
    );

    Ok(ChamberOutcome::from_summaries(
        chamber,
        &summaries,
        lookups_failed,
        output_path,
    ))
}

/// Read a chamber's roster file from the data directory.
fn read_roster(data_dir: &Path, chamber: Chamber) -> Result<String> {
    let path = data_dir.join(chamber.roster_file_name());
    std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {} roster: {}", chamber, path.display()))
}

/// Handle --dry-run: parse the rosters, list members, exit.
fn handle_dry_run(data_dir: &Path, chambers: &[Chamber]) -> Result<()> {
    println!("\n🔍 Dry run: parsing rosters (no API calls)...");

    for &chamber in chambers {
        let names = analysis::parse_roster(&read_roster(data_dir, chamber)?);

        println!("\n   {} ({} members):", chamber, names.len());
        for name in &names {
            println!("     👤 {}", name);
        }
        println!(
            "   Would write: {}",
            report::report_path(data_dir, chamber).display()
        );
    }

    println!("\n✅ Dry run complete. No API calls were made.");
    Ok(())
}

/// Handle --fetch-rosters: rewrite the roster files, exit.
async fn handle_fetch_rosters(
    args: &Args,
    config: &Config,
    congress_number: u32,
    chambers: &[Chamber],
) -> Result<()> {
    let api_key = args
        .congress_api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .context("PROPUBLICA_CONGRESS_API_KEY is not set (export it or add it to .env)")?;

    let api = CongressApi::new(CongressSettings {
        base_url: config.congress.base_url.clone(),
        api_key,
        timeout_seconds: config.congress.timeout_seconds,
    })?;

    println!("🏛️  Refreshing rosters for congress {}", congress_number);
    println!("   API: {}", config.congress.base_url);
    println!("   Data: {}", config.general.data_dir.display());

    for &chamber in chambers {
        let refresh =
            congress::refresh_roster(&api, &config.general.data_dir, congress_number, chamber)
                .await?;

        match refresh.written {
            Some(path) => println!(
                "   {}: {} members -> {}",
                refresh.chamber,
                refresh.members,
                path.display()
            ),
            None => println!(
                "   ⚠️  {}: nothing fetched, existing roster kept",
                refresh.chamber
            ),
        }
    }

    println!("\n✅ Rosters refreshed.");
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default()? {
        Some(config) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
