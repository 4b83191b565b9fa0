//! Integration tests for the scrape pipeline
//!
//! These tests use wiremock to stand in for the catalog site and tempfile
//! directories for the snapshot and error log.

use chrono::{DateTime, Local, Utc};
use shirt_snapshot::config::Config;
use shirt_snapshot::output::snapshot_file_name;
use shirt_snapshot::{run, ErrorKind};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer, workdir: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = format!("{}/", server.uri());
    config.output.data_dir = workdir.join("data").to_string_lossy().into_owned();
    config.output.error_log = workdir
        .join("scraper-error.log")
        .to_string_lossy()
        .into_owned();
    config
}

fn listing_page(links: &[&str]) -> String {
    let items: String = links
        .iter()
        .map(|link| format!(r#"<li><a href="{}"><img src="thumb.jpg"></a></li>"#, link))
        .collect();
    format!(
        r#"<html><head><title>Shirts</title></head><body>
        <nav><a href="index.php">Home</a></nav>
        <ul class="products">{}</ul>
        </body></html>"#,
        items
    )
}

fn product_page(title: &str, price: &str, image: &str) -> String {
    format!(
        r#"<html><head><title>{}</title></head><body>
        <div class="shirt-picture"><span><img src="{}" alt="{}"></span></div>
        <div class="shirt-details"><h1><span class="price">{}</span> {}</h1></div>
        </body></html>"#,
        title, image, title, price, title
    )
}

async fn mount(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

fn snapshot_path(config: &Config) -> std::path::PathBuf {
    Path::new(&config.output.data_dir).join(snapshot_file_name(Local::now().date_naive()))
}

fn error_log_lines(config: &Config) -> Vec<String> {
    fs::read_to_string(&config.output.error_log)
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

fn csv_files(config: &Config) -> usize {
    fs::read_dir(&config.output.data_dir)
        .map(|entries| entries.count())
        .unwrap_or(0)
}

#[tokio::test]
async fn test_full_scrape_writes_snapshot() {
    let server = MockServer::start().await;
    let workdir = TempDir::new().unwrap();
    let config = create_test_config(&server, workdir.path());
    let base = config.site.base_url.clone();

    mount(
        &server,
        "/shirts.php",
        ResponseTemplate::new(200).set_body_string(listing_page(&[
            "shirt-jimi-hendrix.php",
            "shirt-bob-marley.php",
        ])),
    )
    .await;
    mount(
        &server,
        "/shirt-jimi-hendrix.php",
        ResponseTemplate::new(200).set_body_string(product_page(
            "Jimi Hendrix Shirt",
            "$19.99",
            "images/jimi.jpg",
        )),
    )
    .await;
    mount(
        &server,
        "/shirt-bob-marley.php",
        ResponseTemplate::new(200).set_body_string(product_page(
            "Bob Marley Shirt",
            "$21.99",
            "images/bob.jpg",
        )),
    )
    .await;

    let report = run(&config).await.expect("Scrape failed");

    assert_eq!(report.products, 2);
    assert_eq!(report.path, snapshot_path(&config));

    let mut reader = csv::Reader::from_path(&report.path).unwrap();
    let header: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(header, vec!["Title", "Price", "ImageURL", "URL", "Time"]);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);

    assert_eq!(&rows[0][0], "Jimi Hendrix Shirt");
    assert_eq!(&rows[0][1], "$19.99");
    assert_eq!(rows[0][2], format!("{}images/jimi.jpg", base));
    assert_eq!(rows[0][3], format!("{}shirt-jimi-hendrix.php", base));

    assert_eq!(&rows[1][0], "Bob Marley Shirt");
    assert_eq!(&rows[1][1], "$21.99");
    assert_eq!(rows[1][2], format!("{}images/bob.jpg", base));
    assert_eq!(rows[1][3], format!("{}shirt-bob-marley.php", base));

    for row in &rows {
        let time = DateTime::parse_from_rfc3339(&row[4]).expect("Time column is RFC 3339");
        assert!(time.with_timezone(&Utc) <= Utc::now());
        assert!(row[4].ends_with('Z'));
    }

    assert!(error_log_lines(&config).is_empty());
}

#[tokio::test]
async fn test_listing_404_logs_and_writes_nothing() {
    let server = MockServer::start().await;
    let workdir = TempDir::new().unwrap();
    let config = create_test_config(&server, workdir.path());

    mount(&server, "/shirts.php", ResponseTemplate::new(404)).await;

    let err = run(&config).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));

    assert_eq!(csv_files(&config), 0);

    let lines = error_log_lines(&config);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("404"));
    assert!(lines[0].contains(&config.site.base_url));
}

#[tokio::test]
async fn test_one_failed_product_suppresses_snapshot() {
    let server = MockServer::start().await;
    let workdir = TempDir::new().unwrap();
    let config = create_test_config(&server, workdir.path());

    mount(
        &server,
        "/shirts.php",
        ResponseTemplate::new(200).set_body_string(listing_page(&[
            "shirt.php?id=101",
            "shirt-102.php",
            "shirt-103.php",
            "shirt-104.php",
        ])),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/shirt.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page(
            "Logo Shirt",
            "$18.00",
            "img/101.jpg",
        )))
        .mount(&server)
        .await;
    mount(
        &server,
        "/shirt-102.php",
        ResponseTemplate::new(200).set_body_string(product_page("Mike", "$20.00", "img/102.jpg")),
    )
    .await;
    mount(&server, "/shirt-103.php", ResponseTemplate::new(500)).await;
    mount(
        &server,
        "/shirt-104.php",
        ResponseTemplate::new(200).set_body_string(product_page("Cat", "$25.00", "img/104.jpg")),
    )
    .await;

    let err = run(&config).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);

    assert_eq!(csv_files(&config), 0);

    let lines = error_log_lines(&config);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("500"));
}

#[tokio::test]
async fn test_empty_listing_writes_header_only() {
    let server = MockServer::start().await;
    let workdir = TempDir::new().unwrap();
    let config = create_test_config(&server, workdir.path());

    mount(
        &server,
        "/shirts.php",
        ResponseTemplate::new(200).set_body_string(listing_page(&[])),
    )
    .await;

    let report = run(&config).await.unwrap();

    assert_eq!(report.products, 0);
    assert_eq!(
        fs::read_to_string(&report.path).unwrap(),
        "Title,Price,ImageURL,URL,Time\n"
    );
}

#[tokio::test]
async fn test_many_products_keep_listing_order() {
    let server = MockServer::start().await;
    let workdir = TempDir::new().unwrap();
    let mut config = create_test_config(&server, workdir.path());
    config.http.max_concurrent_requests = 4;

    let links: Vec<String> = (0..12).map(|i| format!("shirt-{}.php", i)).collect();
    let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
    mount(
        &server,
        "/shirts.php",
        ResponseTemplate::new(200).set_body_string(listing_page(&link_refs)),
    )
    .await;

    for i in 0..12u64 {
        // Earlier entries answer later
        mount(
            &server,
            &format!("/shirt-{}.php", i),
            ResponseTemplate::new(200)
                .set_body_string(product_page(
                    &format!("Shirt {}", i),
                    "$20.00",
                    &format!("img/{}.jpg", i),
                ))
                .set_delay(std::time::Duration::from_millis((12 - i) * 15)),
        )
        .await;
    }

    let report = run(&config).await.unwrap();
    assert_eq!(report.products, 12);

    let mut reader = csv::Reader::from_path(&report.path).unwrap();
    let titles: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[0].to_string())
        .collect();
    let expected: Vec<String> = (0..12).map(|i| format!("Shirt {}", i)).collect();
    assert_eq!(titles, expected);
}

#[tokio::test]
async fn test_same_day_rerun_overwrites_snapshot() {
    let server = MockServer::start().await;
    let workdir = TempDir::new().unwrap();
    let config = create_test_config(&server, workdir.path());

    mount(
        &server,
        "/shirts.php",
        ResponseTemplate::new(200).set_body_string(listing_page(&["shirt-1.php"])),
    )
    .await;
    mount(
        &server,
        "/shirt-1.php",
        ResponseTemplate::new(200).set_body_string(product_page("One", "$1.00", "img/1.jpg")),
    )
    .await;

    let first = run(&config).await.unwrap();
    let second = run(&config).await.unwrap();

    assert_eq!(first.path, second.path);
    assert_eq!(csv_files(&config), 1);
    assert_eq!(fs::read_to_string(&second.path).unwrap().lines().count(), 2);
}

#[tokio::test]
async fn test_unreachable_site_is_logged() {
    let workdir = TempDir::new().unwrap();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut config = Config::default();
    config.site.base_url = format!("http://127.0.0.1:{}/", port);
    config.output.data_dir = workdir.path().join("data").to_string_lossy().into_owned();
    config.output.error_log = workdir
        .path()
        .join("scraper-error.log")
        .to_string_lossy()
        .into_owned();

    let err = run(&config).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransportFailure);

    assert_eq!(csv_files(&config), 0);
    assert_eq!(error_log_lines(&config).len(), 1);
}

#[tokio::test]
async fn test_strict_extraction_failure_is_logged() {
    let server = MockServer::start().await;
    let workdir = TempDir::new().unwrap();
    let mut config = create_test_config(&server, workdir.path());
    config.selectors.require_all_fields = true;

    mount(
        &server,
        "/shirts.php",
        ResponseTemplate::new(200).set_body_string(listing_page(&["shirt-1.php"])),
    )
    .await;
    mount(
        &server,
        "/shirt-1.php",
        ResponseTemplate::new(200)
            .set_body_string("<html><head><title>No price</title></head><body></body></html>"),
    )
    .await;

    let err = run(&config).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExtractionFailure);

    let lines = error_log_lines(&config);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Failed to extract Price"));
}
