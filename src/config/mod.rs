//! Configuration module for Listing-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every field is optional; the defaults describe the stock run.
//!
//! # Example
//!
//! ```no_run
//! use listing_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Product cards: {}", config.extract.product);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, DetailConfig, ExtractConfig, OutputConfig, SourceConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, validate_selector};
