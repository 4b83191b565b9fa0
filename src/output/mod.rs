//! Output module for scrape results
//!
//! This module handles:
//! - Writing dated CSV snapshots of the product collection
//! - Appending failed runs to the error log

mod error_log;
mod snapshot;

pub use error_log::{format_entry, ErrorLog};
pub use snapshot::{
    format_timestamp, snapshot_file_name, write_snapshot, write_snapshot_for_date,
    SNAPSHOT_HEADER,
};
