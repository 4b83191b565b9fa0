//! Configuration module for Shirt-Snapshot
//!
//! Configuration is an explicit value handed to the pipeline. It can come from
//! `Config::default()` or from a TOML file, which only needs the keys it changes.
//!
//! # Example
//!
//! ```no_run
//! use shirt_snapshot::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("snapshot.toml")).unwrap();
//! println!("Listing page: {}", config.site.listing_url());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig, SelectorConfig, SiteConfig};

pub use parser::{load_config, parse_config};
pub use validation::validate;
