/// End-to-end tests against the live demo site.
/// Network access and Chrome are not guaranteed in every environment: the
/// network test reports failures instead of asserting on them, and the
/// browser tests are ignored by default.
/// Run with: cargo test --test end_to_end_tests -- --ignored
use std::collections::HashSet;

use rust_product_scraper::browser_client::ChromeSession;
use rust_product_scraper::config::Config;
use rust_product_scraper::fetcher::fetch_static;
use rust_product_scraper::pagination::PaginationDriver;

#[tokio::test]
async fn test_live_static_listing() {
    let config = Config::default();
    let client = config
        .fetch
        .create_http_client()
        .expect("Failed to create HTTP client");

    let result = fetch_static(&client, "https://webscraper.io/test-sites/e-commerce/allinone").await;

    match result {
        Ok(products) => {
            assert!(products.iter().all(|p| p.rating <= 5));
            assert!(products.iter().all(|p| p.price >= 0.0));
            println!("✓ {} products from the live site", products.len());
        }
        Err(e) => {
            eprintln!("Warning: live fetch failed (may be expected in CI): {}", e);
        }
    }
}

#[test]
#[ignore] // Requires Chrome/Chromium and internet
fn test_interactive_scrape_drains_listing() {
    let config = Config::default();
    let session = ChromeSession::new(&config.fetch.browser_config())
        .expect("Failed to start browser. Is Chrome/Chromium installed?");

    let driver = PaginationDriver::with_settings(session, config.fetch.pagination_settings());
    let products = driver
        .collect("https://webscraper.io/test-sites/e-commerce/more/computers/laptops")
        .unwrap();

    // The first batch shows six tiles; pagination must reveal more than that.
    assert!(
        products.len() > 6,
        "expected pagination to load more than the initial batch, got {}",
        products.len()
    );

    let unique: HashSet<_> = products.iter().map(|p| p.dedup_key()).collect();
    assert_eq!(unique.len(), products.len(), "no duplicates after pagination");
}
