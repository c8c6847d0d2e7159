//! Strategy dispatch between the one-shot HTTP fetch and the browser-driven
//! incremental fetch. Both return the same thing: every product on the page.

use crate::browser_client::ChromeSession;
use crate::config::FetchConfig;
use crate::error::ScrapeError;
use crate::extract::extract_products;
use crate::http_client::HttpClient;
use crate::models::{CatalogEntry, FetchStrategy, Product};
use crate::pagination::PaginationDriver;

/// Fetch one catalog entry with whichever strategy it is flagged for.
/// The static path never creates a browser session.
pub async fn fetch_entry(
    fetch: &FetchConfig,
    http: &HttpClient,
    entry: &CatalogEntry,
) -> Result<Vec<Product>, ScrapeError> {
    match entry.strategy {
        FetchStrategy::Static => fetch_static(http, &entry.url).await,
        FetchStrategy::Interactive => fetch_interactive(fetch, &entry.url),
    }
}

/// One GET, one parse, every tile currently in the document.
pub async fn fetch_static(http: &HttpClient, url: &str) -> Result<Vec<Product>, ScrapeError> {
    log::info!("Fetching {} with a single request", url);

    let html = http.get_text(url).await?;
    let products = extract_products(&html);

    log::info!("Found {} products at {}", products.len(), url);
    Ok(products)
}

/// Start a browser session and run the pagination driver to completion.
pub fn fetch_interactive(fetch: &FetchConfig, url: &str) -> Result<Vec<Product>, ScrapeError> {
    log::info!("Fetching {} with a browser session", url);

    let session = ChromeSession::new(&fetch.browser_config())?;
    let driver = PaginationDriver::with_settings(session, fetch.pagination_settings());
    driver.collect(url)
}
