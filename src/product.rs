//! Catalog data model

use chrono::{DateTime, Utc};
use std::fmt;

/// A product page reference as it appears on the listing page
///
/// Kept verbatim (usually a relative path like `shirt.php?id=101`); it is
/// joined onto the base URL by plain concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingReference(String);

impl ListingReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute address of the product page
    pub fn resolve(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.0)
    }
}

impl fmt::Display for ListingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One scraped product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub title: String,
    pub price: String,
    /// Base URL + extracted image path
    pub image_url: String,
    /// Base URL + listing reference
    pub url: String,
    /// When the product page was extracted (millisecond precision)
    pub fetched_at: DateTime<Utc>,
}

/// Products in listing-page order
pub type ProductCollection = Vec<Product>;
