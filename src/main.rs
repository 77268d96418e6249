//! Home-Harvest main entry point
//!
//! This is the command-line interface for the two harvest stages.

use anyhow::Context;
use clap::{Parser, Subcommand};
use home_harvest::config::{load_config_with_hash, Config};
use home_harvest::harvest::Query;
use home_harvest::output::{print_harvest_report, print_listing_report};
use home_harvest::{harvest_details, harvest_listings};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Home-Harvest: a paced, resumable listing harvester
///
/// The `listings` stage saves one CSV snapshot per region. The `details`
/// stage then downloads every page those snapshots reference, skipping pages
/// already saved, so it can be interrupted and re-run at any time.
#[derive(Parser, Debug)]
#[command(name = "home-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A paced, resumable listing harvester", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (built-in defaults otherwise)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download listing snapshots for every configured region
    Listings {
        /// Only include homes sold within this many days
        #[arg(long, default_value_t = 90)]
        days: u32,

        /// Destination directory (default: a new sold_in<days>days_from_<timestamp> directory)
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },

    /// Download the detail pages referenced by the listing snapshots in DIR
    Details {
        #[arg(value_name = "DIR")]
        dest: PathBuf,
    },

    /// Show the regions and listing queries without sending any request
    DryRun {
        #[arg(long, default_value_t = 90)]
        days: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("Using built-in configuration");
            Config::default()
        }
    };

    let result = match cli.command {
        Command::Listings { days, dest } => handle_listings(&config, days, dest).await,
        Command::Details { dest } => handle_details(&config, &dest).await,
        Command::DryRun { days } => handle_dry_run(&config, days),
    };

    if let Err(e) = &result {
        tracing::error!("Harvest failed: {:#}", e);
    }
    result
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("home_harvest=info,warn"),
            1 => EnvFilter::new("home_harvest=debug,info"),
            2 => EnvFilter::new("home_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the listing stage, creating a timestamped directory when none is given
async fn handle_listings(config: &Config, days: u32, dest: Option<PathBuf>) -> anyhow::Result<()> {
    let dest = match dest {
        Some(dest) => dest,
        None => {
            let timestamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
            let dir = PathBuf::from(format!("sold_in{}days_from_{}", days, timestamp));
            std::fs::create_dir(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            dir
        }
    };
    tracing::info!("Will save data to {}", dest.display());

    let report = harvest_listings(config, &dest, days).await?;
    print_listing_report(&report);
    Ok(())
}

async fn handle_details(config: &Config, dest: &Path) -> anyhow::Result<()> {
    let report = harvest_details(config, dest).await?;
    print_harvest_report(&report);
    Ok(())
}

/// Prints what the listing stage would request
fn handle_dry_run(config: &Config, days: u32) -> anyhow::Result<()> {
    println!("=== Home-Harvest Dry Run ===\n");

    println!("Fetch:");
    println!(
        "  Timeouts: connect {}ms, read {}ms",
        config.fetch.connect_timeout_ms, config.fetch.read_timeout_ms
    );
    println!("  User agent: {}", config.fetch.user_agent);

    println!("\nPacing:");
    println!(
        "  Listing: {}-{}s",
        config.pacing.listing_min_secs, config.pacing.listing_max_secs
    );
    println!(
        "  Detail: {}-{}s",
        config.pacing.detail_min_secs, config.pacing.detail_max_secs
    );

    println!("\nRegions ({}):", config.regions.len());
    for region in &config.regions {
        let url = Query::new(region, &config.listing, days).to_url(&config.listing.endpoint)?;
        println!("  - {} ({})", region.name, region.code);
        println!("    {}", url);
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}
