use crate::config::types::{Config, DetailConfig, ExtractConfig, OutputConfig, SourceConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_extract_config(&config.extract)?;
    validate_detail_config(&config.detail)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the source URL settings
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let base_url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e)))?;

    if base_url.scheme() != "http" && base_url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    base_url.join(&config.listing_path).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid listing-path '{}': {}",
            config.listing_path, e
        ))
    })?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates listing selectors and price parsing settings
fn validate_extract_config(config: &ExtractConfig) -> Result<(), ConfigError> {
    validate_selector(&config.product)?;
    validate_selector(&config.title)?;
    validate_selector(&config.description)?;
    validate_selector(&config.price)?;
    validate_selector(&config.rating)?;

    if config.rating_attribute.is_empty() {
        return Err(ConfigError::Validation(
            "rating-attribute cannot be empty".to_string(),
        ));
    }

    if config.currency_symbol.is_empty() {
        return Err(ConfigError::Validation(
            "currency-symbol cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates detail-page selectors
fn validate_detail_config(config: &DetailConfig) -> Result<(), ConfigError> {
    validate_selector(&config.controls)?;
    validate_selector(&config.price)?;
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    if config.log_path.is_empty() {
        return Err(ConfigError::Validation(
            "log-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that a CSS selector parses
pub fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector {
            selector: selector.to_string(),
            message: format!("{:?}", e),
        })
}
