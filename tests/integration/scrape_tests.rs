//! End-to-end scrape tests
//!
//! These tests use wiremock to serve listing pages and run the full
//! fetch → extract → write pipeline into a temporary directory.

use listing_harvest::config::Config;
use listing_harvest::crawler::{run_scrape, Coordinator, UnavailableBrowser};
use listing_harvest::ScrapeError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><title>Web Scraper Test Sites</title></head>
<body>
<div class="container test-site">
  <div class="row">
    <div class="col-md-4 col-xl-4 col-lg-4">
      <div class="card thumbnail">
        <div class="card-body">
          <h4 class="price float-end card-title pull-right">$1178.99</h4>
          <h4><a href="/test-sites/e-commerce/allinone/product/60" class="title" title="Apple MacBook Air 13.3&quot;">Apple MacBook Air...</a></h4>
          <p class="description card-text">Apple MacBook Air 13.3", Core i5 1.8GHz, 8GB, 128GB SSD</p>
        </div>
        <div class="ratings">
          <p class="review-count float-end">11 reviews</p>
          <p data-rating="4"><span class="ws-icon ws-icon-star"></span></p>
        </div>
      </div>
    </div>
    <div class="col-md-4 col-xl-4 col-lg-4">
      <div class="card thumbnail">
        <div class="card-body">
          <h4 class="price float-end card-title pull-right">$24.99</h4>
          <h4><a href="/test-sites/e-commerce/allinone/product/32" class="title" title="Nokia 123">Nokia 123</a></h4>
          <p class="description card-text">7 day battery</p>
        </div>
        <div class="ratings">
          <p class="review-count float-end">3 reviews</p>
          <p data-rating="3"><span class="ws-icon ws-icon-star"></span></p>
        </div>
      </div>
    </div>
    <div class="col-md-4 col-xl-4 col-lg-4">
      <div class="card thumbnail">
        <div class="card-body">
          <h4 class="price float-end card-title pull-right">$0</h4>
          <h4><a href="/test-sites/e-commerce/allinone/product/1" class="title" title="Sample Tablet">Sample Tablet</a></h4>
          <p class="description card-text">Demo unit</p>
        </div>
        <div class="ratings">
          <p class="review-count float-end">0 reviews</p>
          <p data-rating="1"><span class="ws-icon ws-icon-star"></span></p>
        </div>
      </div>
    </div>
  </div>
</div>
</body>
</html>"#;

async fn serve_listing(status: u16, body: &str) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test-sites/e-commerce/allinone"))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    mock_server
}

/// Default config pointed at the mock server and a scratch directory
fn create_test_config(mock_server: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.source.base_url = format!("{}/", mock_server.uri());
    config.output.csv_path = dir.path().join("products.csv").display().to_string();
    config.output.log_path = dir.path().join("app.log").display().to_string();
    config
}

fn read_rows(path: &str) -> (csv::StringRecord, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open CSV");
    let header = reader.headers().expect("Missing header").clone();
    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .expect("Failed to read rows");
    (header, rows)
}

#[tokio::test]
async fn test_full_scrape_writes_csv() {
    let mock_server = serve_listing(200, LISTING_PAGE).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, &dir);
    let csv_path = config.output.csv_path.clone();

    let report = run_scrape(config).await.expect("Scrape failed");

    assert_eq!(report.products_written, 3);
    assert_eq!(report.products_with_configurations, 0);

    let (header, rows) = read_rows(&csv_path);
    assert_eq!(
        header.iter().collect::<Vec<_>>(),
        vec!["title", "description", "price", "rating"]
    );
    assert_eq!(rows.len(), 3);

    assert_eq!(&rows[0][0], "Apple MacBook Air 13.3\"");
    assert_eq!(
        &rows[0][1],
        "Apple MacBook Air 13.3\", Core i5 1.8GHz, 8GB, 128GB SSD"
    );
    assert_eq!(&rows[0][2], "1178.99");
    assert_eq!(&rows[0][3], "4");

    assert_eq!(&rows[1][0], "Nokia 123");
    assert_eq!(&rows[2][2], "0.0");
    assert_eq!(&rows[2][3], "1");
}

#[tokio::test]
async fn test_empty_listing_writes_header_only() {
    let mock_server = serve_listing(200, "<html><body><p>Sold out</p></body></html>").await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, &dir);
    let csv_path = config.output.csv_path.clone();

    let report = run_scrape(config).await.expect("Scrape failed");

    assert_eq!(report.products_written, 0);
    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(content, "title,description,price,rating\n");
}

#[tokio::test]
async fn test_http_error_aborts_run() {
    let mock_server = serve_listing(503, "maintenance").await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, &dir);
    let csv_path = config.output.csv_path.clone();

    let result = run_scrape(config).await;

    assert!(matches!(result, Err(ScrapeError::Http { .. })));
    assert!(!std::path::Path::new(&csv_path).exists());
}

#[tokio::test]
async fn test_not_found_aborts_run() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, &dir);

    let result = run_scrape(config).await;

    assert!(matches!(result, Err(ScrapeError::Http { .. })));
}

#[tokio::test]
async fn test_malformed_listing_aborts_run() {
    let body = r#"<div class="thumbnail">
        <a class="title" title="Headless" href="/p/1">Headless</a>
        <p class="description">No price or rating</p>
    </div>"#;
    let mock_server = serve_listing(200, body).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, &dir);
    let csv_path = config.output.csv_path.clone();

    let result = run_scrape(config).await;

    assert!(matches!(result, Err(ScrapeError::MissingElement { .. })));
    assert!(!std::path::Path::new(&csv_path).exists());
}

#[tokio::test]
async fn test_existing_csv_is_overwritten() {
    let mock_server = serve_listing(200, LISTING_PAGE).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, &dir);
    let csv_path = config.output.csv_path.clone();
    std::fs::write(&csv_path, "stale,data\n1,2\n3,4\n5,6\n7,8\n").unwrap();

    run_scrape(config).await.expect("Scrape failed");

    let (_, rows) = read_rows(&csv_path);
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_unwritable_output_fails() {
    let mock_server = serve_listing(200, LISTING_PAGE).await;
    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server, &dir);
    config.output.csv_path = dir
        .path()
        .join("missing")
        .join("products.csv")
        .display()
        .to_string();

    let result = run_scrape(config).await;

    assert!(matches!(result, Err(ScrapeError::Io(_))));
}

#[tokio::test]
async fn test_coordinator_collects_without_writing() {
    let mock_server = serve_listing(200, LISTING_PAGE).await;
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server, &dir);
    let csv_path = config.output.csv_path.clone();

    let coordinator = Coordinator::new(config, UnavailableBrowser).expect("Failed to create coordinator");
    let products = coordinator.collect_products().await.expect("Collect failed");

    let titles: Vec<&str> = products.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Apple MacBook Air 13.3\"", "Nokia 123", "Sample Tablet"]);
    assert_eq!(products[1].price, 24.99);
    assert!(!std::path::Path::new(&csv_path).exists());
}
