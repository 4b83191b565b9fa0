//! HTML parsing for the listing and product pages
//!
//! Selectors come from configuration and are compiled once per run.

use crate::config::SelectorConfig;
use crate::product::{ListingReference, Product};
use crate::{ConfigError, ScrapeError};
use chrono::{SubsecRound, Utc};
use scraper::{ElementRef, Html, Selector};

/// Compiled CSS selectors for one run
#[derive(Debug, Clone)]
pub struct Selectors {
    product_links: Selector,
    title: Selector,
    price: Selector,
    image: Selector,
    require_all_fields: bool,
}

impl Selectors {
    /// Compiles every selector in `config`
    ///
    /// # Returns
    ///
    /// * `Ok(Selectors)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - The first selector that did not
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            product_links: compile_one("product-links", &config.product_links)?,
            title: compile_one("title", &config.title)?,
            price: compile_one("price", &config.price)?,
            image: compile_one("image", &config.image)?,
            require_all_fields: config.require_all_fields,
        })
    }

    /// Extracts product references from the listing page, in document order
    ///
    /// Duplicates are kept. Anchors without an `href` are skipped.
    pub fn extract_links(&self, listing_body: &str) -> Vec<ListingReference> {
        let document = Html::parse_document(listing_body);

        document
            .select(&self.product_links)
            .filter_map(|anchor| anchor.value().attr("href"))
            .map(ListingReference::new)
            .collect()
    }

    /// Extracts a product from its page
    ///
    /// Missing elements become empty fields unless `require-all-fields` is
    /// set. This leniency is intentional: a shirt with no price still gets a
    /// row. `image_url` and `url` are built by plain concatenation onto
    /// `base_url`, without normalization.
    pub fn extract_product(
        &self,
        product_body: &str,
        reference: &ListingReference,
        base_url: &str,
    ) -> Result<Product, ScrapeError> {
        let url = reference.resolve(base_url);
        let document = Html::parse_document(product_body);

        let title = self.field_text(&document, &self.title, &url, "Title")?;
        let price = self.field_text(&document, &self.price, &url, "Price")?;

        let image_path = match document
            .select(&self.image)
            .next()
            .and_then(|img| img.value().attr("src"))
        {
            Some(src) => src.to_string(),
            None if self.require_all_fields => {
                return Err(ScrapeError::Extraction {
                    url,
                    field: "ImageURL",
                })
            }
            None => String::new(),
        };

        Ok(Product {
            title,
            price,
            image_url: format!("{}{}", base_url, image_path),
            url,
            fetched_at: Utc::now().trunc_subsecs(3),
        })
    }

    /// Text of every element matching `selector`, joined and trimmed
    fn field_text(
        &self,
        document: &Html,
        selector: &Selector,
        url: &str,
        field: &'static str,
    ) -> Result<String, ScrapeError> {
        let matches: Vec<ElementRef> = document.select(selector).collect();

        if matches.is_empty() && self.require_all_fields {
            return Err(ScrapeError::Extraction {
                url: url.to_string(),
                field,
            });
        }

        Ok(matches
            .iter()
            .flat_map(|element| element.text())
            .collect::<String>()
            .trim()
            .to_string())
    }
}

fn compile_one(name: &'static str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
        name,
        selector: selector.to_string(),
    })
}
