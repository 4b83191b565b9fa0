use serde::Deserialize;

/// Main configuration structure for Shirt-Snapshot
///
/// Every field has a default, so an empty TOML file (or no file at all)
/// yields the stock shirts4mike.com setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub selectors: SelectorConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Where the catalog lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base address; listing path and product references are appended to it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the listing page relative to the base address
    #[serde(rename = "listing-path")]
    pub listing_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://shirts4mike.com/".to_string(),
            listing_path: "shirts.php".to_string(),
        }
    }
}

impl SiteConfig {
    /// Absolute address of the listing page
    pub fn listing_url(&self) -> String {
        format!("{}{}", self.base_url, self.listing_path)
    }
}

/// CSS selectors used on the listing and product pages
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Anchors on the listing page, one per product
    #[serde(rename = "product-links")]
    pub product_links: String,

    pub title: String,

    pub price: String,

    /// Image element; its `src` attribute is read
    pub image: String,

    /// Fail the run when a product page lacks one of the fields
    #[serde(rename = "require-all-fields")]
    pub require_all_fields: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            product_links: "ul.products li a".to_string(),
            title: "title".to_string(),
            price: ".shirt-details h1 span.price".to_string(),
            image: "div.shirt-picture span img".to_string(),
            require_all_fields: false,
        }
    }
}

/// HTTP client behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Maximum number of product pages fetched at once
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("shirt-snapshot/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_concurrent_requests: 8,
        }
    }
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the dated CSV snapshots
    #[serde(rename = "data-dir")]
    pub data_dir: String,

    /// Append-only log of failed runs
    #[serde(rename = "error-log")]
    pub error_log: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            error_log: "./scraper-error.log".to_string(),
        }
    }
}
