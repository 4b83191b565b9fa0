//! Dated CSV snapshots
//!
//! One file per calendar day (`YYYY-MM-DD.csv`); a second run on the same
//! day overwrites the first.

use crate::product::Product;
use crate::ScrapeError;
use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Header row of every snapshot
pub const SNAPSHOT_HEADER: [&str; 5] = ["Title", "Price", "ImageURL", "URL", "Time"];

/// File name for a snapshot taken on `date`
pub fn snapshot_file_name(date: NaiveDate) -> String {
    format!("{}.csv", date.format("%Y-%m-%d"))
}

/// Canonical text form of a capture time, e.g. `2024-03-01T12:00:00.000Z`
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Writes `products` to today's snapshot in `data_dir`
///
/// The directory is created if needed. The file name uses the local date at
/// write time, not the products' capture times.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(ScrapeError)` - Directory or file could not be written
pub fn write_snapshot(products: &[Product], data_dir: &Path) -> Result<PathBuf, ScrapeError> {
    write_snapshot_for_date(products, data_dir, Local::now().date_naive())
}

/// Same as [`write_snapshot`] with an explicit date
pub fn write_snapshot_for_date(
    products: &[Product],
    data_dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, ScrapeError> {
    if !data_dir.exists() {
        tracing::debug!("Creating data directory {}", data_dir.display());
        fs::create_dir_all(data_dir)?;
    }

    let path = data_dir.join(snapshot_file_name(date));
    let mut writer = csv::Writer::from_path(&path)?;

    // Written by hand so an empty run still gets a header
    writer.write_record(SNAPSHOT_HEADER)?;
    for product in products {
        writer.write_record([
            product.title.as_str(),
            product.price.as_str(),
            product.image_url.as_str(),
            product.url.as_str(),
            format_timestamp(&product.fetched_at).as_str(),
        ])?;
    }
    writer.flush()?;

    Ok(path)
}
