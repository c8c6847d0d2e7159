/// Static fetch tests against a local mock server. No browser is ever
/// started on this path.
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rust_product_scraper::config::FetchConfig;
use rust_product_scraper::error::ScrapeError;
use rust_product_scraper::fetcher::{fetch_entry, fetch_static};
use rust_product_scraper::http_client::{HttpClient, HttpClientConfig};
use rust_product_scraper::models::{CatalogEntry, FetchStrategy};

const LISTING_PAGE: &str = r#"
<html><body>
    <div class="thumbnail">
        <h4 class="price">$24.99</h4>
        <h4><a class="title" title="Nokia 123">Nokia 123</a></h4>
        <p class="description">7 day battery</p>
        <div class="ratings">
            <p class="float-end">3 reviews</p>
            <p>
                <span class="ws-icon ws-icon-star"></span>
                <span class="ws-icon ws-icon-star"></span>
                <span class="ws-icon ws-icon-star"></span>
            </p>
        </div>
    </div>
    <div class="thumbnail">
        <h4 class="price">$295.99</h4>
        <h4><a class="title" title="Asus VivoBook">Asus VivoBook</a></h4>
        <p class="description">14 inch laptop</p>
        <div class="ratings">
            <p class="float-end">14 reviews</p>
            <p data-rating="4"></p>
        </div>
    </div>
</body></html>"#;

fn quick_client() -> HttpClient {
    HttpClient::with_config(HttpClientConfig {
        max_retries: 0,
        ..HttpClientConfig::default()
    })
    .expect("client builds")
}

#[tokio::test]
async fn test_static_fetch_extracts_all_tiles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/listing"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_PAGE))
        .mount(&server)
        .await;

    let client = quick_client();
    let products = fetch_static(&client, &format!("{}/listing", server.uri()))
        .await
        .unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].title, "Nokia 123");
    assert_eq!(products[0].price, 24.99);
    assert_eq!(products[0].rating, 3);
    assert_eq!(products[0].num_of_reviews, 3);
    assert_eq!(products[1].title, "Asus VivoBook");
    assert_eq!(products[1].rating, 4);
}

#[tokio::test]
async fn test_static_entry_issues_exactly_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/listing"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    // An entry with no strategy flag takes the static path.
    let entry: CatalogEntry = toml::from_str(&format!(
        "url = \"{}/listing\"\noutput_file = \"listing.csv\"",
        server.uri()
    ))
    .unwrap();
    assert_eq!(entry.strategy, FetchStrategy::Static);

    let client = quick_client();
    let products = fetch_entry(&FetchConfig::default(), &client, &entry)
        .await
        .unwrap();

    assert_eq!(products.len(), 2);
    // the .expect(1) above is verified when the server drops
}

#[tokio::test]
async fn test_page_without_tiles_is_zero_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>nothing here</body></html>"),
        )
        .mount(&server)
        .await;

    let client = quick_client();
    let products = fetch_static(&client, &format!("{}/empty", server.uri()))
        .await
        .unwrap();

    assert!(products.is_empty());
}

#[tokio::test]
async fn test_not_found_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = quick_client();
    let err = fetch_static(&client, &format!("{}/gone", server.uri()))
        .await
        .unwrap_err();

    match err {
        ScrapeError::Http { status, .. } => assert_eq!(status.as_u16(), 404),
        other => panic!("expected an http status error, got {}", other),
    }
}

#[tokio::test]
async fn test_server_error_surfaces_as_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = quick_client();
    let err = fetch_static(&client, &format!("{}/down", server.uri()))
        .await
        .unwrap_err();

    match err {
        ScrapeError::Http { status, .. } => assert_eq!(status.as_u16(), 503),
        other => panic!("expected an http status error, got {}", other),
    }
}

#[tokio::test]
async fn test_unreachable_host_is_a_network_error() {
    let client = quick_client();
    // Port reserved but never listened on
    let err = fetch_static(&client, "http://127.0.0.1:9/listing")
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Network(_)));
}
