//! Detail-page configuration crawl
//!
//! A product's detail page offers a row of configuration controls (e.g.
//! storage capacity buttons). Selecting one re-renders the displayed price.
//! This module walks every enabled control and records `value -> price`.
//!
//! The browser is reached through two traits so the walk itself does not
//! depend on a particular automation backend:
//! - [`DetailBrowser`] opens one session per detail page
//! - [`DetailSession`] reads controls, activates them and reads the price
//!
//! Every session opened here is closed before returning, on success and on
//! failure alike.

#![allow(async_fn_in_trait)]

use crate::crawler::parser::parse_price;
use crate::ScrapeError;
use std::collections::BTreeMap;
use url::Url;

/// One selectable configuration control on a detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationControl {
    /// Position among the matched controls
    pub index: usize,

    /// The control's `value` property, used as the configuration label
    pub value: String,

    pub disabled: bool,
}

/// Opens browser sessions on detail pages
pub trait DetailBrowser {
    type Session: DetailSession;

    /// Opens a fresh session with `url` loaded
    async fn open(&self, url: &Url) -> Result<Self::Session, ScrapeError>;
}

/// A loaded detail page
pub trait DetailSession {
    /// Lists the configuration controls in page order
    async fn controls(&mut self) -> Result<Vec<ConfigurationControl>, ScrapeError>;

    /// Activates the control at `index`
    async fn select(&mut self, index: usize) -> Result<(), ScrapeError>;

    /// Reads the currently displayed price text
    async fn price_text(&mut self) -> Result<String, ScrapeError>;

    /// Releases the session
    async fn close(self) -> Result<(), ScrapeError>;
}

/// Collects the per-configuration prices of one detail page
///
/// Disabled controls are skipped. A page without controls yields an empty map.
///
/// # Arguments
///
/// * `browser` - The session factory
/// * `url` - Absolute detail page URL
/// * `currency_symbol` - Stripped from the displayed price before parsing
///
/// # Returns
///
/// * `Ok(BTreeMap)` - Configuration value -> price
/// * `Err(ScrapeError)` - Browser failure or unparseable price; the session
///   has been closed either way
pub async fn enumerate_configurations<B: DetailBrowser>(
    browser: &B,
    url: &Url,
    currency_symbol: &str,
) -> Result<BTreeMap<String, f64>, ScrapeError> {
    tracing::debug!("Opening detail page {}", url);
    let mut session = browser.open(url).await?;

    let walked = walk_controls(&mut session, currency_symbol).await;
    let closed = session.close().await;

    let prices = walked?;
    closed?;

    Ok(prices)
}

/// Selects each enabled control in turn and reads the price it displays
async fn walk_controls<S: DetailSession>(
    session: &mut S,
    currency_symbol: &str,
) -> Result<BTreeMap<String, f64>, ScrapeError> {
    let mut prices = BTreeMap::new();

    for control in session.controls().await? {
        if control.disabled {
            tracing::debug!("Skipping disabled configuration '{}'", control.value);
            continue;
        }

        session.select(control.index).await?;
        let price = parse_price(&session.price_text().await?, currency_symbol)?;

        tracing::debug!("Configuration '{}' priced at {}", control.value, price);
        prices.insert(control.value, price);
    }

    Ok(prices)
}

/// Stand-in used when the crate is built without browser support
///
/// Opening a session always fails with [`ScrapeError::BrowserUnavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableBrowser;

/// Session type of [`UnavailableBrowser`]; cannot be constructed
#[derive(Debug)]
pub enum NoSession {}

impl DetailBrowser for UnavailableBrowser {
    type Session = NoSession;

    async fn open(&self, _url: &Url) -> Result<NoSession, ScrapeError> {
        Err(ScrapeError::BrowserUnavailable)
    }
}

impl DetailSession for NoSession {
    async fn controls(&mut self) -> Result<Vec<ConfigurationControl>, ScrapeError> {
        match *self {}
    }

    async fn select(&mut self, _index: usize) -> Result<(), ScrapeError> {
        match *self {}
    }

    async fn price_text(&mut self) -> Result<String, ScrapeError> {
        match *self {}
    }

    async fn close(self) -> Result<(), ScrapeError> {
        match self {}
    }
}
