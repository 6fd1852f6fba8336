//! Catalogue-Harvest main entry point
//!
//! This is the command-line interface for the catalogue harvester.

use anyhow::Context;
use catalogue_harvest::config::{load_config_with_hash, Config};
use catalogue_harvest::harvest::{build_http_client, discover_total_pages, harvest};
use catalogue_harvest::report::{print_stats, write_report};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalogue-Harvest: a concurrent catalogue listing harvester
///
/// Discovers how many listing pages the catalogue has, fetches them all
/// across a bounded worker pool, and compiles every item into a formatted
/// spreadsheet report. Progress and failures go to the log file, which is
/// rewritten on each run.
#[derive(Parser, Debug)]
#[command(name = "catalogue-harvest")]
#[command(version)]
#[command(about = "Harvests a paginated catalogue into a spreadsheet report", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Discover the page count and show the plan without harvesting
    #[arg(long)]
    probe: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration before the logger: the log path comes from it
    let (config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path).with_context(|| {
                format!("failed to load configuration from {}", path.display())
            })?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    setup_logging(&config.output.log_path, cli.verbose, cli.quiet)
        .with_context(|| format!("failed to open log file {}", config.output.log_path))?;

    match (&cli.config, &config_hash) {
        (Some(path), Some(hash)) => {
            tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash);
        }
        _ => tracing::info!("No configuration file given, using built-in defaults"),
    }

    if cli.probe {
        handle_probe(&config).await?;
    } else {
        handle_harvest(config).await?;
    }

    Ok(())
}

/// Sets up the tracing subscriber writing to the run's log file
///
/// The file is truncated so each run starts a fresh log. The Mutex-wrapped
/// writer serializes appends from concurrent fetch tasks, so lines never
/// interleave.
fn setup_logging(log_path: &str, verbose: u8, quiet: bool) -> std::io::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalogue_harvest=info,warn"),
            1 => EnvFilter::new("catalogue_harvest=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    let log_file = std::fs::File::create(log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    Ok(())
}

/// Handles the --probe mode: runs discovery only and prints the plan
async fn handle_probe(config: &Config) -> anyhow::Result<()> {
    let client = build_http_client(&config.harvester)?;
    let total_pages = discover_total_pages(&client, &config.catalogue.start_url).await;

    println!("=== Catalogue Probe ===\n");
    println!("Start URL:   {}", config.catalogue.start_url);
    println!("Total pages: {}", total_pages);
    println!("First page:  {}", config.catalogue.page_url(1));
    println!("Last page:   {}", config.catalogue.page_url(total_pages));
    println!(
        "\nA full run would fetch {} pages with {} workers into '{}'",
        total_pages, config.harvester.workers, config.output.report_path
    );

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config) -> anyhow::Result<()> {
    let report_path = PathBuf::from(&config.output.report_path);
    let sheet_name = config.output.sheet_name.clone();

    let result = harvest(config).await?;

    tracing::info!("Generating the spreadsheet report");
    match write_report(&result.items, &report_path, &sheet_name) {
        Ok(()) => {
            tracing::info!(
                "Report '{}' written with {} items",
                report_path.display(),
                result.items.len()
            );
        }
        Err(e) => {
            // Best-effort terminal step: log loudly, finish normally
            tracing::error!("CRITICAL: failed to generate the report file: {}", e);
        }
    }

    print_stats(&result.stats);

    Ok(())
}
