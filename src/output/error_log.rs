//! Append-only log of failed runs

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Formats one log line: `[timestamp] message\n`
pub fn format_entry(time: &DateTime<Utc>, message: &str) -> String {
    format!(
        "[{}] {}\n",
        time.to_rfc3339_opts(SecondsFormat::Millis, true),
        message
    )
}

/// The error log file
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `error` to the log
    ///
    /// Never fails. If the log itself cannot be written, the problem goes to
    /// stderr and is dropped.
    pub fn record(&self, error: &dyn Display) {
        if let Err(e) = self.append(&error.to_string()) {
            eprintln!(
                "Failed to write error log {}: {}",
                self.path.display(),
                e
            );
        }
    }

    /// Appends one timestamped line, creating the file if needed
    pub fn append(&self, message: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format_entry(&Utc::now(), message).as_bytes())
    }
}
