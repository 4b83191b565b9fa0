//! Shirt-Snapshot main entry point
//!
//! This is the command-line interface for the Shirt-Snapshot catalog scraper.

use anyhow::Context;
use clap::Parser;
use shirt_snapshot::config::{load_config, Config};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Shirt-Snapshot: a daily CSV snapshot of the shirt catalog
///
/// Fetches the listing page, every product page it links to, and writes
/// the products to `<data-dir>/YYYY-MM-DD.csv`. Failed runs are appended to
/// the error log instead.
#[derive(Parser, Debug)]
#[command(name = "shirt-snapshot")]
#[command(version)]
#[command(about = "Daily CSV snapshot of a shirt catalog", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without scraping
    #[arg(long)]
    dry_run: bool,

    /// Exit with status 1 when the scrape fails
    #[arg(long)]
    strict_exit: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(ExitCode::SUCCESS);
    }

    match shirt_snapshot::run(&config).await {
        Ok(report) => {
            tracing::info!(
                "Snapshot complete: {} products in {}",
                report.products,
                report.path.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        // Already recorded in the error log
        Err(_) if cli.strict_exit => Ok(ExitCode::FAILURE),
        Err(_) => Ok(ExitCode::SUCCESS),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shirt_snapshot=info,warn"),
            1 => EnvFilter::new("shirt_snapshot=debug,info"),
            2 => EnvFilter::new("shirt_snapshot=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: prints what a run would do
fn handle_dry_run(config: &Config) {
    println!("=== Shirt-Snapshot Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Listing page: {}", config.site.listing_url());

    println!("\nSelectors:");
    println!("  Product links: {}", config.selectors.product_links);
    println!("  Title: {}", config.selectors.title);
    println!("  Price: {}", config.selectors.price);
    println!("  Image: {}", config.selectors.image);
    println!(
        "  Require all fields: {}",
        config.selectors.require_all_fields
    );

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!(
        "  Max concurrent requests: {}",
        config.http.max_concurrent_requests
    );

    println!("\nOutput:");
    println!("  Data directory: {}", config.output.data_dir);
    println!("  Error log: {}", config.output.error_log);

    println!("\n✓ Configuration is valid");
}
