//! The set of listing pages one run scrapes, and the loop that processes
//! them in order.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::csv_writer::write_products;
use crate::error::ScrapeError;
use crate::fetcher::fetch_entry;
use crate::http_client::HttpClient;
use crate::models::{CatalogEntry, FetchStrategy};

pub const BASE_URL: &str = "https://webscraper.io";

fn listing(path: &str, output_file: &str) -> CatalogEntry {
    CatalogEntry {
        url: format!("{}/test-sites/e-commerce/more/{}", BASE_URL, path),
        output_file: output_file.to_string(),
        strategy: FetchStrategy::Interactive,
    }
}

/// The demo site's listing pages. All of them sit behind a "load more"
/// control, so they all use the interactive strategy.
pub fn default_catalog() -> Vec<CatalogEntry> {
    vec![
        listing("", "home.csv"),
        listing("computers/", "computers.csv"),
        listing("phones/", "phones.csv"),
        listing("computers/laptops", "laptops.csv"),
        listing("computers/tablets", "tablets.csv"),
        listing("phones/touch", "touch.csv"),
    ]
}

/// Process every catalog entry, strictly one at a time: fetch, extract,
/// write the CSV, then move on.
///
/// By default the first failing entry halts the run; with
/// `continue_on_error` set, it is logged and the remaining entries still
/// get their turn.
pub async fn run_catalog(config: &Config) -> Result<(), ScrapeError> {
    let http = config.fetch.create_http_client()?;

    let entries = if config.catalog.is_empty() {
        default_catalog()
    } else {
        config.catalog.clone()
    };

    log::info!("Processing {} catalog entries", entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let started = Instant::now();

        match process_entry(config, &http, entry).await {
            Ok(count) => log::info!(
                "{} -> {}: {} products in {:.2?}",
                entry.url,
                entry.output_file,
                count,
                started.elapsed()
            ),
            Err(e) if config.continue_on_error => {
                log::error!("Entry {} failed, continuing: {}", entry.url, e);
            }
            Err(e) => return Err(e),
        }

        if index + 1 < entries.len() {
            tokio::time::sleep(Duration::from_millis(config.fetch.rate_limit_delay_ms)).await;
        }
    }

    Ok(())
}

async fn process_entry(
    config: &Config,
    http: &HttpClient,
    entry: &CatalogEntry,
) -> Result<usize, ScrapeError> {
    let products = fetch_entry(&config.fetch, http, entry).await?;

    let path = Path::new(&config.output_dir).join(&entry.output_file);
    write_products(&products, &path)?;

    Ok(products.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_covers_all_listing_pages() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 6);

        let files: Vec<&str> = catalog.iter().map(|e| e.output_file.as_str()).collect();
        assert_eq!(
            files,
            [
                "home.csv",
                "computers.csv",
                "phones.csv",
                "laptops.csv",
                "tablets.csv",
                "touch.csv"
            ]
        );
    }

    #[test]
    fn test_default_catalog_is_interactive() {
        for entry in default_catalog() {
            assert_eq!(entry.strategy, FetchStrategy::Interactive);
            assert!(entry.url.starts_with("https://webscraper.io/test-sites/e-commerce/more/"));
        }
    }
}
