//! Listing-Harvest main entry point
//!
//! This is the command-line interface for the Listing-Harvest scraper.
//! Run without arguments it scrapes the stock listing page into
//! `products.csv` and logs to the console and `app.log`.

use anyhow::Context;
use clap::Parser;
use listing_harvest::config::{load_config, validate, Config};
use listing_harvest::crawler::run_scrape;
use listing_harvest::logging::{init_logging, LogOptions};
use std::path::PathBuf;

/// Listing-Harvest: a product listing scraper
///
/// Fetches a product listing page, extracts title, description, price and
/// rating for every product card, and writes them to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "listing-harvest")]
#[command(version)]
#[command(about = "A product listing scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the CSV here instead of the configured path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also visit every product's detail page and collect configuration prices
    #[arg(long)]
    detail: bool,

    /// Append log lines to this file instead of the configured path
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;

    let _log = init_logging(&LogOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        log_file: Some(PathBuf::from(&config.output.log_path)),
    })
    .context("Failed to initialize logging")?;

    match &cli.config {
        Some(path) => tracing::info!("Configuration loaded from: {}", path.display()),
        None => tracing::info!("Using default configuration"),
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
        return Ok(());
    }

    handle_scrape(config).await
}

/// Loads the configuration file (if any) and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }
    if let Some(log_file) = &cli.log_file {
        config.output.log_path = log_file.display().to_string();
    }
    if cli.detail {
        config.detail.enabled = true;
    }

    validate(&config).context("Invalid configuration")?;

    Ok(config)
}

/// Handles the --dry-run mode: validates config and shows what would be scraped
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Listing-Harvest Dry Run ===\n");

    println!("Source:");
    println!("  Listing URL: {}", config.listing_url()?);
    println!("  User agent: {}", config.source.user_agent);

    println!("\nSelectors:");
    println!("  Product card: {}", config.extract.product);
    println!("  Title: {}", config.extract.title);
    println!("  Description: {}", config.extract.description);
    println!("  Price: {} (currency '{}')", config.extract.price, config.extract.currency_symbol);
    println!("  Rating: {} [{}]", config.extract.rating, config.extract.rating_attribute);

    println!("\nDetail crawl:");
    if config.detail.enabled {
        println!("  Enabled (controls: {}, price: {})", config.detail.controls, config.detail.price);
        if cfg!(not(feature = "browser")) {
            println!("  ! This build has no browser support; the run would fail");
        }
    } else {
        println!("  Disabled");
    }

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  Log: {}", config.output.log_path);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting scrape");

    match run_scrape(config).await {
        Ok(report) => {
            tracing::info!(
                "Wrote {} products to {}",
                report.products_written,
                report.output_path.display()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e).context("Scrape failed")
        }
    }
}
