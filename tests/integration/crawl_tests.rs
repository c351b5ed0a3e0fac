//! Integration tests for the crawl pipeline
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full fetch, extract, filter and download cycle end-to-end.

use std::path::Path;
use sumi_harvest::config::CrawlConfig;
use sumi_harvest::crawler::{crawl, CrawlReport};
use sumi_harvest::{ConfigError, HarvestError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, pages: u32, output_dir: &Path) -> CrawlConfig {
    let mut config = CrawlConfig::new(format!("{}/search", base_url));
    config.page_count = pages;
    config.output_dir = output_dir.to_path_buf();
    config
}

/// Renders a results page from `(kind, href)` rows
fn results_page(rows: &[(&str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(kind, href)| {
            format!(
                r#"<tr class="result">
                    <td class="name-sec"><a href="{}">Name</a></td>
                    <td class="position-sec"><strong>{}</strong></td>
                </tr>"#,
                href, kind
            )
        })
        .collect();

    format!(
        r#"<html><body><table class="search-results"><tbody>{}</tbody></table></body></html>"#,
        rows
    )
}

async fn mount_results_page(server: &MockServer, page: u32, rows: &[(&str, &str)]) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("PageNum", page.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(results_page(rows))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_profile(server: &MockServer, profile_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(profile_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn html_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read output dir")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_full_crawl_downloads_partners_only() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    mount_results_page(
        &mock_server,
        1,
        &[
            ("Partner", "/people/jane-doe"),
            ("Associate", "/people/john-roe"),
            ("Partner", "/people/ann-poe"),
        ],
    )
    .await;
    mount_profile(&mock_server, "/people/jane-doe", "<html>Jane</html>").await;
    mount_profile(&mock_server, "/people/ann-poe", "<html>Ann</html>").await;

    Mock::given(method("GET"))
        .and(path("/people/john-roe"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 1, output.path());
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(
        report,
        CrawlReport {
            pages_fetched: 1,
            partners_downloaded: 2,
        }
    );
    assert_eq!(
        html_files(output.path()),
        vec!["ann-poe.html", "jane-doe.html"]
    );

    let jane = std::fs::read(output.path().join("jane-doe.html")).unwrap();
    assert_eq!(jane, b"<html>Jane</html>");
}

#[tokio::test]
async fn test_pages_are_fetched_in_order() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    for page in 1..=3 {
        mount_results_page(&mock_server, page, &[]).await;
    }

    let config = create_test_config(&mock_server.uri(), 3, output.path());
    let report = crawl(config).await.expect("Crawl failed");
    assert_eq!(report.pages_fetched, 3);

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    let pages: Vec<String> = requests
        .iter()
        .map(|r| r.url.query().unwrap_or("").to_string())
        .collect();
    assert_eq!(pages, vec!["PageNum=1", "PageNum=2", "PageNum=3"]);
}

#[tokio::test]
async fn test_downloads_follow_document_order_between_pages() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    mount_results_page(
        &mock_server,
        1,
        &[("Partner", "/people/b-first"), ("Partner", "/people/a-second")],
    )
    .await;
    mount_results_page(&mock_server, 2, &[("Partner", "/people/c-third")]).await;
    for profile in ["/people/b-first", "/people/a-second", "/people/c-third"] {
        mount_profile(&mock_server, profile, "<html></html>").await;
    }

    let config = create_test_config(&mock_server.uri(), 2, output.path());
    crawl(config).await.expect("Crawl failed");

    let requests = mock_server.received_requests().await.unwrap();
    let paths: Vec<String> = requests
        .iter()
        .map(|r| match r.url.query() {
            Some(query) => format!("{}?{}", r.url.path(), query),
            None => r.url.path().to_string(),
        })
        .collect();
    assert_eq!(
        paths,
        vec![
            "/search?PageNum=1",
            "/people/b-first",
            "/people/a-second",
            "/search?PageNum=2",
            "/people/c-third",
        ]
    );
}

#[tokio::test]
async fn test_same_basename_last_write_wins() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    mount_results_page(
        &mock_server,
        1,
        &[("Partner", "/people/jane-doe"), ("Partner", "/alumni/jane-doe")],
    )
    .await;
    mount_profile(&mock_server, "/people/jane-doe", "current").await;
    mount_profile(&mock_server, "/alumni/jane-doe", "alumni").await;

    let config = create_test_config(&mock_server.uri(), 1, output.path());
    crawl(config).await.expect("Crawl failed");

    let written = std::fs::read_to_string(output.path().join("jane-doe.html")).unwrap();
    assert_eq!(written, "alumni");
}

#[tokio::test]
async fn test_failed_page_halts_later_pages() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("PageNum", "1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("PageNum", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 2, output.path());
    let result = crawl(config).await;

    match result {
        Err(HarvestError::Status { url, status }) => {
            assert!(url.ends_with("/search?PageNum=1"), "unexpected url {}", url);
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_download_halts_later_pages() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    mount_results_page(
        &mock_server,
        1,
        &[("Partner", "/people/gone"), ("Partner", "/people/jane-doe")],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/people/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/people/jane-doe"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("PageNum", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 2, output.path());
    let result = crawl(config).await;

    assert!(
        matches!(result, Err(HarvestError::Status { ref url, .. }) if url.ends_with("/people/gone")),
        "unexpected result {:?}",
        result
    );
    assert!(html_files(output.path()).is_empty());
}

#[tokio::test]
async fn test_empty_codebase_fails_before_network() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = CrawlConfig::new("");
    config.output_dir = output.path().join("never-created");

    let result = crawl(config).await;

    assert!(matches!(
        result,
        Err(HarvestError::Config(ConfigError::Validation(_)))
    ));
    assert!(!output.path().join("never-created").exists());
}

#[tokio::test]
async fn test_output_dir_is_created() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let nested = output.path().join("harvest").join("partners");

    mount_results_page(&mock_server, 1, &[("Partner", "/people/jane-doe")]).await;
    mount_profile(&mock_server, "/people/jane-doe", "<html>Jane</html>").await;

    let config = create_test_config(&mock_server.uri(), 1, &nested);
    crawl(config).await.expect("Crawl failed");

    assert!(nested.join("jane-doe.html").is_file());
}

#[tokio::test]
async fn test_failed_write_halts_later_pages() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    // A directory squatting on the target file name makes the write fail.
    std::fs::create_dir(output.path().join("jane-doe.html")).unwrap();

    mount_results_page(&mock_server, 1, &[("Partner", "/people/jane-doe")]).await;
    mount_profile(&mock_server, "/people/jane-doe", "<html>Jane</html>").await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("PageNum", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 2, output.path());
    let result = crawl(config).await;

    match result {
        Err(HarvestError::Write { path, .. }) => {
            assert_eq!(path, output.path().join("jane-doe.html"));
        }
        other => panic!("expected a write error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_results_page_with_invalid_utf8_is_still_processed() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    let mut body = results_page(&[("Partner", "/people/jose")]).into_bytes();
    let marker = body
        .windows(4)
        .position(|w| w == b"Name")
        .expect("row template has a name cell");
    body[marker + 1] = 0xe9;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("PageNum", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("content-type", "text/html; charset=iso-8859-1"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_profile(&mock_server, "/people/jose", "<html>Jose</html>").await;

    let config = create_test_config(&mock_server.uri(), 1, output.path());
    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.partners_downloaded, 1);
    assert_eq!(html_files(output.path()), vec!["jose.html"]);
}
