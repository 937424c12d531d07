//! Scrape coordinator - main pipeline orchestration
//!
//! This module runs the three pipeline stages in order:
//! - Fetching the listing page
//! - Extracting products (and, when enabled, walking each detail page)
//! - Writing the CSV file
//!
//! Every stage is awaited in sequence; the first error aborts the run and
//! nothing is written.

use crate::config::Config;
use crate::crawler::detail::{enumerate_configurations, DetailBrowser};
use crate::crawler::parser::{extract_listings, ListingSelectors};
use crate::crawler::{build_http_client, fetch_page};
use crate::output::write_products_csv;
use crate::product::Product;
use crate::ScrapeError;
use reqwest::Client;
use std::path::PathBuf;
use url::Url;

/// What a completed run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Number of rows written (header excluded)
    pub products_written: usize,

    /// Products for which the detail crawl recorded configuration prices
    pub products_with_configurations: usize,

    /// Where the CSV went
    pub output_path: PathBuf,
}

/// Main pipeline coordinator
pub struct Coordinator<B> {
    config: Config,
    client: Client,
    selectors: ListingSelectors,
    browser: B,
}

impl<B: DetailBrowser> Coordinator<B> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The scrape configuration
    /// * `browser` - Session factory for the detail crawl; only used when
    ///   `config.detail.enabled` is set
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - Invalid selectors or HTTP client setup failure
    pub fn new(config: Config, browser: B) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.source)?;
        let selectors = ListingSelectors::new(&config.extract)?;

        Ok(Self {
            config,
            client,
            selectors,
            browser,
        })
    }

    /// Fetches the listing page and extracts every product
    pub async fn collect_products(&self) -> Result<Vec<Product>, ScrapeError> {
        let listing_url = self.config.listing_url()?;
        tracing::info!("Fetching listing page {}", listing_url);

        let html = fetch_page(&self.client, listing_url.as_str()).await?;
        let listings = extract_listings(&html, &self.selectors)?;
        tracing::info!("Extracted {} products", listings.len());

        if !self.config.detail.enabled {
            return Ok(listings.into_iter().map(|listing| listing.product).collect());
        }

        let base_url = self.config.base_url()?;
        let mut products = Vec::with_capacity(listings.len());

        for (position, listing) in listings.into_iter().enumerate() {
            let mut product = listing.product;

            let href = listing
                .detail_href
                .ok_or_else(|| ScrapeError::MissingAttribute {
                    field: "title",
                    attribute: "href".to_string(),
                })?;
            let detail_url = resolve_detail_url(&base_url, &href)?;

            tracing::info!(
                "Crawling configurations for product {} ({})",
                position + 1,
                product.title
            );
            product.additional_info = enumerate_configurations(
                &self.browser,
                &detail_url,
                &self.config.extract.currency_symbol,
            )
            .await?;

            tracing::debug!(
                "{}: {} configuration prices",
                product.title,
                product.additional_info.len()
            );
            products.push(product);
        }

        Ok(products)
    }

    /// Runs the whole pipeline: fetch, extract, write
    ///
    /// # Returns
    ///
    /// * `Ok(RunReport)` - The CSV was written
    /// * `Err(ScrapeError)` - Any stage failed; no CSV is written
    pub async fn run(&self) -> Result<RunReport, ScrapeError> {
        let products = self.collect_products().await?;

        let output_path = PathBuf::from(&self.config.output.csv_path);
        tracing::info!(
            "Writing {} products to {}",
            products.len(),
            output_path.display()
        );
        write_products_csv(&output_path, &products)?;

        // Configuration prices stay in memory; the CSV columns are fixed
        let products_with_configurations = products
            .iter()
            .filter(|product| product.has_configurations())
            .count();
        if products_with_configurations > 0 {
            tracing::info!(
                "{} products carry configuration prices (not written to CSV)",
                products_with_configurations
            );
        }

        tracing::info!("Scrape complete");

        Ok(RunReport {
            products_written: products.len(),
            products_with_configurations,
            output_path,
        })
    }
}

/// Resolves a listing's detail link against the site base URL
pub fn resolve_detail_url(base_url: &Url, href: &str) -> Result<Url, ScrapeError> {
    Ok(base_url.join(href.trim())?)
}
