//! HTTP fetcher implementation
//!
//! This module handles the listing page request:
//! - Building the HTTP client with the configured user agent
//! - GET requests for page content
//! - Mapping transport failures and non-success statuses to errors
//!
//! There is no retry: any failure aborts the run.

use crate::config::SourceConfig;
use crate::ScrapeError;
use reqwest::Client;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The source configuration (user agent)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use listing_harvest::config::SourceConfig;
/// use listing_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&SourceConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &SourceConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its body as text
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(ScrapeError::Http)` - Connection failure, non-success status, or unreadable body
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let http_error = |source| ScrapeError::Http {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(http_error)?;
    let status = response.status();
    let response = response.error_for_status().map_err(http_error)?;
    let body = response.text().await.map_err(http_error)?;

    tracing::debug!("Fetched {} ({}, {} bytes)", url, status, body.len());

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&SourceConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_http_client_custom_agent() {
        let config = SourceConfig {
            user_agent: "TestHarvester/2.0 (+https://example.com)".to_string(),
            ..SourceConfig::default()
        };
        let client = build_http_client(&config).unwrap();
        assert!(format!("{:?}", client).contains("Client"));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host() {
        let client = build_http_client(&SourceConfig::default()).unwrap();
        // Port 9 (discard) on loopback refuses connections
        let result = fetch_page(&client, "http://127.0.0.1:9/").await;
        assert!(matches!(result, Err(ScrapeError::Http { .. })));
    }

    // Status-code handling is covered with wiremock in the integration tests
}
