//! Crawler module for page fetching and product extraction
//!
//! This module contains the scrape pipeline, including:
//! - HTTP fetching of the listing page
//! - HTML parsing into product records
//! - The optional per-product detail-page crawl
//! - Overall pipeline coordination

#[cfg(feature = "browser")]
mod browser;
mod coordinator;
mod detail;
mod fetcher;
mod parser;

#[cfg(feature = "browser")]
pub use browser::{ChromeBrowser, ChromeSession};
pub use coordinator::{resolve_detail_url, Coordinator, RunReport};
pub use detail::{
    enumerate_configurations, ConfigurationControl, DetailBrowser, DetailSession, NoSession,
    UnavailableBrowser,
};
pub use fetcher::{build_http_client, fetch_page};
pub use parser::{
    extract_listings, extract_products, parse_price, parse_rating, ListingSelectors, ParsedListing,
};

use crate::config::Config;
use crate::ScrapeError;

/// Runs a complete scrape with the default detail backend
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client and compile the selectors
/// 2. Fetch the listing page
/// 3. Extract products (and walk detail pages if enabled)
/// 4. Write the CSV file
///
/// Builds without the `browser` feature fail on the first product when the
/// detail crawl is enabled.
///
/// # Arguments
///
/// * `config` - The scrape configuration
///
/// # Returns
///
/// * `Ok(RunReport)` - Scrape completed successfully
/// * `Err(ScrapeError)` - Scrape failed
pub async fn run_scrape(config: Config) -> Result<RunReport, ScrapeError> {
    #[cfg(feature = "browser")]
    let browser = ChromeBrowser::new(&config.detail);
    #[cfg(not(feature = "browser"))]
    let browser = UnavailableBrowser;

    Coordinator::new(config, browser)?.run().await
}
