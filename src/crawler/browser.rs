//! Headless Chrome backend for the detail crawl
//!
//! Each [`ChromeBrowser::open`] launches its own Chrome process; the session
//! owns that process and the task pumping its CDP event stream. Closing the
//! session shuts both down.

use crate::config::DetailConfig;
use crate::crawler::detail::{ConfigurationControl, DetailBrowser, DetailSession};
use crate::ScrapeError;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use url::Url;

fn browser_error(e: impl std::fmt::Display) -> ScrapeError {
    ScrapeError::Browser(e.to_string())
}

/// Launches a Chrome instance per detail page
#[derive(Debug, Clone)]
pub struct ChromeBrowser {
    controls: String,
    price: String,
    headless: bool,
}

impl ChromeBrowser {
    pub fn new(config: &DetailConfig) -> Self {
        Self {
            controls: config.controls.clone(),
            price: config.price.clone(),
            headless: config.headless,
        }
    }
}

/// A Chrome process with one page loaded
pub struct ChromeSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    controls: String,
    price: String,
}

impl DetailBrowser for ChromeBrowser {
    type Session = ChromeSession;

    async fn open(&self, url: &Url) -> Result<ChromeSession, ScrapeError> {
        let mut builder = BrowserConfig::builder();
        if !self.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(ScrapeError::Browser)?;

        let (mut browser, mut events) = Browser::launch(config).await.map_err(browser_error)?;
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match load_page(&browser, url).await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler.abort();
                return Err(e);
            }
        };

        Ok(ChromeSession {
            browser,
            handler,
            page,
            controls: self.controls.clone(),
            price: self.price.clone(),
        })
    }
}

async fn load_page(browser: &Browser, url: &Url) -> Result<Page, ScrapeError> {
    let page = browser.new_page(url.as_str()).await.map_err(browser_error)?;
    page.wait_for_navigation().await.map_err(browser_error)?;
    Ok(page)
}

impl ChromeSession {
    async fn control_elements(&self) -> Result<Vec<Element>, ScrapeError> {
        self.page
            .find_elements(self.controls.as_str())
            .await
            .map_err(browser_error)
    }
}

impl DetailSession for ChromeSession {
    async fn controls(&mut self) -> Result<Vec<ConfigurationControl>, ScrapeError> {
        let mut controls = Vec::new();

        for (index, element) in self.control_elements().await?.into_iter().enumerate() {
            let value = element
                .property("value")
                .await
                .map_err(browser_error)?
                .and_then(|v| v.as_str().map(str::to_string))
                .ok_or_else(|| ScrapeError::MissingAttribute {
                    field: "configuration",
                    attribute: "value".to_string(),
                })?;

            let disabled = element
                .property("disabled")
                .await
                .map_err(browser_error)?
                .and_then(|v| v.as_bool())
                .unwrap_or(false);

            controls.push(ConfigurationControl {
                index,
                value,
                disabled,
            });
        }

        Ok(controls)
    }

    async fn select(&mut self, index: usize) -> Result<(), ScrapeError> {
        // Re-query: clicking may re-render the control row
        let elements = self.control_elements().await?;
        let element = elements.get(index).ok_or_else(|| ScrapeError::MissingElement {
            field: "configuration",
            selector: self.controls.clone(),
        })?;
        element.click().await.map_err(browser_error)?;
        Ok(())
    }

    async fn price_text(&mut self) -> Result<String, ScrapeError> {
        let element = self
            .page
            .find_element(self.price.as_str())
            .await
            .map_err(|_| ScrapeError::MissingElement {
                field: "detail price",
                selector: self.price.clone(),
            })?;

        Ok(element
            .inner_text()
            .await
            .map_err(browser_error)?
            .unwrap_or_default())
    }

    async fn close(mut self) -> Result<(), ScrapeError> {
        let closed = self.browser.close().await.map(|_| ()).map_err(browser_error);
        let _ = self.browser.wait().await;
        self.handler.abort();
        closed
    }
}
