//! Shirt-Snapshot: a dated CSV snapshot of a shirt catalog
//!
//! This crate reads the catalog's listing page, fetches every product page it
//! links to, extracts the product fields, and writes them to a CSV file named
//! after the current date. A failed run is appended to an error log.

pub mod config;
pub mod crawler;
pub mod output;
pub mod product;

use thiserror::Error;

/// Main error type for a scrape run
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("There's been a {code} error. Cannot connect to {base_url}")]
    UnexpectedStatus {
        code: u16,
        url: String,
        base_url: String,
    },

    #[error("Failed to extract {field} from {url}")]
    Extraction { url: String, field: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Coarse classification of a [`ScrapeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TransportFailure,
    UnexpectedStatus,
    ExtractionFailure,
    Output,
    Config,
}

impl ScrapeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScrapeError::Transport { .. } => ErrorKind::TransportFailure,
            ScrapeError::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            ScrapeError::Extraction { .. } => ErrorKind::ExtractionFailure,
            ScrapeError::Io(_) | ScrapeError::Csv(_) => ErrorKind::Output,
            ScrapeError::Config(_) => ErrorKind::Config,
        }
    }

    /// The HTTP status code, for `UnexpectedStatus` errors
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ScrapeError::UnexpectedStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector '{selector}' for {name}")]
    InvalidSelector { name: &'static str, selector: String },
}

/// Result type alias for scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run, scrape, SnapshotReport};
pub use product::{ListingReference, Product, ProductCollection};
