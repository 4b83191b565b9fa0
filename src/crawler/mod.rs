//! Crawler module for the catalog scrape
//!
//! This module contains the pipeline itself:
//! - HTTP fetching with strict status checking
//! - Listing and product page extraction
//! - Concurrent fan-out over product pages
//! - The `scrape`/`run` entry points that tie in the output layer

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, PageFetcher};
pub use parser::Selectors;

use crate::config::Config;
use crate::output::{write_snapshot, ErrorLog};
use crate::ScrapeError;
use std::path::{Path, PathBuf};

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotReport {
    /// The CSV file that was written
    pub path: PathBuf,
    /// Number of product rows
    pub products: usize,
}

/// Scrapes the catalog and writes the dated CSV snapshot
///
/// Nothing is written unless every product page was fetched.
///
/// # Arguments
///
/// * `config` - The scrape configuration
///
/// # Returns
///
/// * `Ok(SnapshotReport)` - Snapshot written
/// * `Err(ScrapeError)` - The first failure; no snapshot was written
pub async fn scrape(config: &Config) -> Result<SnapshotReport, ScrapeError> {
    let coordinator = Coordinator::new(config)?;
    let products = coordinator.run().await?;

    let path = write_snapshot(&products, Path::new(&config.output.data_dir))?;
    tracing::info!("Wrote {} products to {}", products.len(), path.display());

    Ok(SnapshotReport {
        path,
        products: products.len(),
    })
}

/// Runs one scrape, recording any failure in the error log
///
/// The error is still returned so the caller can choose an exit status.
pub async fn run(config: &Config) -> Result<SnapshotReport, ScrapeError> {
    match scrape(config).await {
        Ok(report) => Ok(report),
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            ErrorLog::new(&config.output.error_log).record(&e);
            Err(e)
        }
    }
}
