//! Listing-Harvest: a product listing scraper
//!
//! This crate fetches a product-listing page, extracts one typed record per
//! listing card, optionally walks each product's detail page to collect
//! per-configuration prices, and writes the records to a CSV file.

pub mod config;
pub mod crawler;
pub mod logging;
pub mod output;
pub mod product;

use thiserror::Error;

/// Main error type for Listing-Harvest operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("No element matching '{selector}' for {field}")]
    MissingElement {
        field: &'static str,
        selector: String,
    },

    #[error("Element for {field} has no '{attribute}' attribute")]
    MissingAttribute {
        field: &'static str,
        attribute: String,
    },

    #[error("Product title is empty")]
    EmptyTitle,

    #[error("Invalid price '{value}'")]
    InvalidPrice { value: String },

    #[error("Invalid rating '{value}'")]
    InvalidRating { value: String },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Detail crawl requested but this build has no browser support (enable the `browser` feature)")]
    BrowserUnavailable,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
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

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Result type alias for Listing-Harvest operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_scrape, RunReport};
pub use product::Product;
