//! Listing page parser
//!
//! This module turns the listing page markup into typed records:
//! - Selecting every product card in document order
//! - Reading title, description, price and rating from each card
//! - Keeping the title link so the detail crawl can follow it
//!
//! Any missing node or unparseable value fails the whole extraction.

use crate::config::ExtractConfig;
use crate::product::Product;
use crate::{ConfigError, ScrapeError};
use scraper::{ElementRef, Html, Selector};

/// Compiled selectors for the listing page
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    product: Selector,
    title: Selector,
    description: Selector,
    price: Selector,
    rating: Selector,
    config: ExtractConfig,
}

impl ListingSelectors {
    /// Compiles every selector in the extract configuration
    pub fn new(config: &ExtractConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            product: compile_selector(&config.product)?,
            title: compile_selector(&config.title)?,
            description: compile_selector(&config.description)?,
            price: compile_selector(&config.price)?,
            rating: compile_selector(&config.rating)?,
            config: config.clone(),
        })
    }
}

/// One listing card: the product plus its raw detail link
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedListing {
    pub product: Product,

    /// `href` of the title node, unresolved
    pub detail_href: Option<String>,
}

/// Compiles a CSS selector, reporting failures as configuration errors
pub(crate) fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Extracts every listing card from a page, in document order
///
/// Zero matching cards is not an error; a warning is logged and the result
/// is empty.
///
/// # Arguments
///
/// * `html` - The listing page markup
/// * `selectors` - Compiled listing selectors
///
/// # Example
///
/// ```
/// use listing_harvest::config::ExtractConfig;
/// use listing_harvest::crawler::{extract_listings, ListingSelectors};
///
/// let html = r#"<div class="thumbnail">
///     <a class="title" title="Nokia 123" href="/product/1">Nokia 123</a>
///     <p class="description">Dual sim</p>
///     <h4 class="price">$24.99</h4>
///     <p data-rating="3"></p>
/// </div>"#;
/// let selectors = ListingSelectors::new(&ExtractConfig::default()).unwrap();
/// let listings = extract_listings(html, &selectors).unwrap();
/// assert_eq!(listings[0].product.price, 24.99);
/// ```
pub fn extract_listings(
    html: &str,
    selectors: &ListingSelectors,
) -> Result<Vec<ParsedListing>, ScrapeError> {
    let document = Html::parse_document(html);

    let listings = document
        .select(&selectors.product)
        .map(|card| parse_listing(card, selectors))
        .collect::<Result<Vec<_>, _>>()?;

    if listings.is_empty() {
        tracing::warn!(
            "No product cards matching '{}' found on the page",
            selectors.config.product
        );
    }

    Ok(listings)
}

/// Extracts the products from a listing page, dropping detail links
pub fn extract_products(html: &str, selectors: &ListingSelectors) -> Result<Vec<Product>, ScrapeError> {
    Ok(extract_listings(html, selectors)?
        .into_iter()
        .map(|listing| listing.product)
        .collect())
}

/// Maps one product card to a listing
fn parse_listing(card: ElementRef<'_>, selectors: &ListingSelectors) -> Result<ParsedListing, ScrapeError> {
    let config = &selectors.config;

    let title_node = select_one(card, &selectors.title, "title", &config.title)?;
    let title = require_attr(title_node, "title", "title")?.trim().to_string();
    if title.is_empty() {
        return Err(ScrapeError::EmptyTitle);
    }
    let detail_href = title_node.value().attr("href").map(str::to_string);

    let description = select_one(card, &selectors.description, "description", &config.description)?
        .text()
        .collect::<String>()
        .trim()
        .to_string();

    let price_text = select_one(card, &selectors.price, "price", &config.price)?
        .text()
        .collect::<String>();
    let price = parse_price(&price_text, &config.currency_symbol)?;

    let rating_node = select_one(card, &selectors.rating, "rating", &config.rating)?;
    let rating = parse_rating(require_attr(rating_node, "rating", &config.rating_attribute)?)?;

    let product = Product::new(title, description, price, rating);

    tracing::debug!(
        "Parsed product: {} (price {}, rating {})",
        product.title,
        product.price,
        product.rating
    );

    Ok(ParsedListing {
        product,
        detail_href,
    })
}

/// Returns the first descendant matching `selector`
fn select_one<'a>(
    card: ElementRef<'a>,
    selector: &Selector,
    field: &'static str,
    source: &str,
) -> Result<ElementRef<'a>, ScrapeError> {
    card.select(selector)
        .next()
        .ok_or_else(|| ScrapeError::MissingElement {
            field,
            selector: source.to_string(),
        })
}

/// Returns the value of a required attribute
fn require_attr<'a>(
    element: ElementRef<'a>,
    field: &'static str,
    attribute: &str,
) -> Result<&'a str, ScrapeError> {
    element
        .value()
        .attr(attribute)
        .ok_or_else(|| ScrapeError::MissingAttribute {
            field,
            attribute: attribute.to_string(),
        })
}

/// Parses a currency-prefixed price such as `$123.45`
///
/// The currency symbol is removed wherever it appears; the remainder must be
/// a finite, non-negative decimal number.
pub fn parse_price(text: &str, currency_symbol: &str) -> Result<f64, ScrapeError> {
    let invalid = || ScrapeError::InvalidPrice {
        value: text.to_string(),
    };

    let price: f64 = text
        .replace(currency_symbol, "")
        .trim()
        .parse()
        .map_err(|_| invalid())?;

    if !price.is_finite() || price < 0.0 {
        return Err(invalid());
    }

    Ok(price)
}

/// Parses an integer rating attribute such as `4`
pub fn parse_rating(text: &str) -> Result<u32, ScrapeError> {
    text.trim().parse().map_err(|_| ScrapeError::InvalidRating {
        value: text.to_string(),
    })
}
