use serde::Deserialize;
use url::Url;

/// Main configuration structure for Listing-Harvest
///
/// Every section and field has a default, so an empty file (or no file at
/// all) describes the stock run against the webscraper.io test shop.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub extract: ExtractConfig,
    pub detail: DetailConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Returns the parsed base URL
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.source.base_url)
    }

    /// Returns the listing page URL (listing path joined onto the base URL)
    pub fn listing_url(&self) -> Result<Url, url::ParseError> {
        self.base_url()?.join(&self.source.listing_path)
    }
}

/// Where the listing page lives and how to ask for it
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SourceConfig {
    /// Site root; detail links are resolved against it
    pub base_url: String,

    /// Path of the listing page relative to `base_url`
    pub listing_path: String,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://webscraper.io/".to_string(),
            listing_path: "test-sites/e-commerce/allinone".to_string(),
            user_agent: format!("listing-harvest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// CSS selectors for the listing page
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExtractConfig {
    /// One match per listing card
    pub product: String,

    /// Title node; carries the `title` and `href` attributes
    pub title: String,

    pub description: String,

    pub price: String,

    /// Node carrying the rating attribute
    pub rating: String,

    pub rating_attribute: String,

    /// Stripped from price text before parsing
    pub currency_symbol: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            product: ".thumbnail".to_string(),
            title: ".title".to_string(),
            description: ".description".to_string(),
            price: ".price".to_string(),
            rating: "p[data-rating]".to_string(),
            rating_attribute: "data-rating".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

/// Detail-page crawl settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DetailConfig {
    /// Visit every product's detail page and record per-configuration prices
    pub enabled: bool,

    /// Selectable configuration controls on the detail page
    pub controls: String,

    /// Price node reflecting the selected configuration
    pub price: String,

    /// Run the browser without a window
    pub headless: bool,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            controls: ".swatches button".to_string(),
            price: ".price".to_string(),
            headless: true,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path to the CSV file (truncated on every run)
    pub csv_path: String,

    /// Path to the log file (appended on every run)
    pub log_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "products.csv".to_string(),
            log_path: "app.log".to_string(),
        }
    }
}
