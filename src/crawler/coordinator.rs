//! Catalog coordinator - fetches the listing, then every product page
//!
//! The listing fetch runs alone. Product pages are fetched concurrently,
//! at most `max-concurrent-requests` at a time, and each result carries the
//! index of its listing reference so the collection comes back in listing
//! order no matter which request finishes first.
//!
//! The first failure ends the run: `try_collect` returns it and drops the
//! stream, which cancels every request still in flight. Under concurrency
//! the error reported is whichever is observed first, not necessarily the
//! one for the earliest listing entry.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, PageFetcher};
use crate::crawler::parser::Selectors;
use crate::product::{ListingReference, Product, ProductCollection};
use crate::ScrapeError;
use futures::stream::{self, StreamExt, TryStreamExt};

/// Fetch-and-extract orchestration for one catalog
#[derive(Debug, Clone)]
pub struct Coordinator {
    fetcher: PageFetcher,
    selectors: Selectors,
    listing_url: String,
    max_concurrent: usize,
}

impl Coordinator {
    /// Creates a coordinator from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ScrapeError)` - Bad selectors or the HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let selectors = Selectors::compile(&config.selectors)?;
        let client = build_http_client(&config.http).map_err(|source| ScrapeError::Transport {
            url: config.site.base_url.clone(),
            source,
        })?;

        Ok(Self {
            fetcher: PageFetcher::new(client, config.site.base_url.clone()),
            selectors,
            listing_url: config.site.listing_url(),
            max_concurrent: config.http.max_concurrent_requests.max(1),
        })
    }

    /// Runs the fetch-extract pipeline
    ///
    /// # Returns
    ///
    /// * `Ok(ProductCollection)` - One product per listing reference, in listing order
    /// * `Err(ScrapeError)` - The first failure observed
    pub async fn run(&self) -> Result<ProductCollection, ScrapeError> {
        tracing::info!("Fetching listing page {}", self.listing_url);
        let listing_body = self.fetcher.fetch(&self.listing_url).await?;

        let references = self.selectors.extract_links(&listing_body);
        tracing::info!("Found {} product links", references.len());

        if references.is_empty() {
            return Ok(Vec::new());
        }

        let mut indexed: Vec<(usize, Product)> = stream::iter(references.into_iter().enumerate())
            .map(|(index, reference)| async move {
                let product = self.fetch_product(&reference).await?;
                Ok::<_, ScrapeError>((index, product))
            })
            .buffer_unordered(self.max_concurrent)
            .try_collect()
            .await?;

        indexed.sort_by_key(|(index, _)| *index);

        Ok(indexed.into_iter().map(|(_, product)| product).collect())
    }

    async fn fetch_product(&self, reference: &ListingReference) -> Result<Product, ScrapeError> {
        let base_url = self.fetcher.base_url();
        let url = reference.resolve(base_url);
        tracing::debug!("Fetching product page {}", url);

        let body = self.fetcher.fetch(&url).await?;
        self.selectors.extract_product(&body, reference, base_url)
    }
}
