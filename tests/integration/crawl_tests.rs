//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for both the search feed and the
//! image hosts, and drive full crawls end-to-end over HTTP.

use image_spider::config::Config;
use image_spider::crawler::{spawn_crawl, CrawlOptions, Crawler};
use image_spider::output::NoopObserver;
use image_spider::state::StopReason;
use image_spider::SpiderError;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer, root: &Path) -> Config {
    let mut config = Config::default();
    config.search.base_url = format!("{}/search/flip?tn=baiduimage&ie=utf-8", server.uri());
    config.http.page_timeout_secs = 5;
    config.http.image_timeout_secs = 2;
    config.download.retry_backoff_ms = 10; // Very short for testing
    config.download.delay_ms = 0;
    config.output.root = root.display().to_string();
    config
}

/// Builds a result page body embedding the given image paths
fn result_page(server: &MockServer, image_paths: &[&str]) -> String {
    let items: Vec<String> = image_paths
        .iter()
        .map(|p| {
            format!(
                r#"{{"thumbURL":"{0}/thumb{1}","objURL":"{0}{1}","fromURL":"ippr_z2C$qAzdH3F"}}"#,
                server.uri(),
                p
            )
        })
        .collect();
    format!(
        "<html><script>var imgdata = {{\"data\":[{}]}};</script></html>",
        items.join(",")
    )
}

async fn mount_page(server: &MockServer, offset: &str, image_paths: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/search/flip"))
        .and(query_param("word", "cats"))
        .and(query_param("pn", offset))
        .respond_with(ResponseTemplate::new(200).set_body_string(result_page(server, image_paths)))
        .mount(server)
        .await;
}

async fn mount_image(server: &MockServer, image_path: &str, status: u16, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(image_path))
        .respond_with(
            ResponseTemplate::new(status).set_body_bytes(format!("image at {}", image_path)),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn saved_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read destination")
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_crawl_stops_mid_second_page_at_target() {
    let server = MockServer::start().await;
    let root = TempDir::new().unwrap();

    mount_page(&server, "0", &["/img/1.jpg", "/img/2.jpg", "/img/3.jpg"]).await;
    mount_page(&server, "20", &["/img/4.jpg", "/img/5.jpg", "/img/6.jpg"]).await;
    for image in ["/img/1.jpg", "/img/2.jpg", "/img/3.jpg", "/img/4.jpg", "/img/5.jpg"] {
        mount_image(&server, image, 200, 1).await;
    }
    // Target is reached before the last candidate of page two
    mount_image(&server, "/img/6.jpg", 200, 0).await;

    let crawler = Crawler::new(create_test_config(&server, root.path())).unwrap();
    let result = crawler
        .crawl(CrawlOptions::new("cats", 5), &NoopObserver, &CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(result.total_downloaded, 5);
    assert_eq!(result.stop_reason, StopReason::TargetReached);
    assert_eq!(result.destination, root.path().join("cats"));
    assert_eq!(
        saved_files(&result.destination),
        vec!["cats_1.jpg", "cats_2.jpg", "cats_3.jpg", "cats_4.jpg", "cats_5.jpg"]
    );
    assert_eq!(
        std::fs::read(result.destination.join("cats_4.jpg")).unwrap(),
        b"image at /img/4.jpg"
    );
}

#[tokio::test]
async fn test_crawl_stops_when_second_page_fails() {
    let server = MockServer::start().await;
    let root = TempDir::new().unwrap();

    mount_page(&server, "0", &["/img/1.jpg", "/img/2.jpg"]).await;
    mount_image(&server, "/img/1.jpg", 200, 1).await;
    mount_image(&server, "/img/2.jpg", 200, 1).await;
    Mock::given(method("GET"))
        .and(path("/search/flip"))
        .and(query_param("pn", "20"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/flip"))
        .and(query_param("pn", "40"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let crawler = Crawler::new(create_test_config(&server, root.path())).unwrap();
    let result = crawler
        .crawl(CrawlOptions::new("cats", 10), &NoopObserver, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.total_downloaded, 2);
    assert_eq!(result.stop_reason, StopReason::PageUnavailable);
    assert_eq!(result.pages_fetched, 1);
}

#[tokio::test]
async fn test_failing_image_is_retried_and_skipped_without_gaps() {
    let server = MockServer::start().await;
    let root = TempDir::new().unwrap();

    mount_page(&server, "0", &["/img/1.jpg", "/img/broken.jpg", "/img/2.jpg"]).await;
    mount_page(&server, "20", &[]).await;
    mount_image(&server, "/img/1.jpg", 200, 1).await;
    mount_image(&server, "/img/broken.jpg", 404, 3).await;
    mount_image(&server, "/img/2.jpg", 200, 1).await;

    let crawler = Crawler::new(create_test_config(&server, root.path())).unwrap();
    let result = crawler
        .crawl(CrawlOptions::new("cats", 10), &NoopObserver, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.total_downloaded, 2);
    assert_eq!(result.stop_reason, StopReason::NoCandidates);
    assert_eq!(saved_files(&result.destination), vec!["cats_1.jpg", "cats_2.jpg"]);
    assert_eq!(
        std::fs::read(result.destination.join("cats_2.jpg")).unwrap(),
        b"image at /img/2.jpg"
    );
}

#[tokio::test]
async fn test_custom_destination_is_used_verbatim() {
    let server = MockServer::start().await;
    let root = TempDir::new().unwrap();
    let custom = root.path().join("my pictures").join("felines");

    mount_page(&server, "0", &["/img/1.jpg"]).await;
    mount_image(&server, "/img/1.jpg", 200, 1).await;

    let crawler = Crawler::new(create_test_config(&server, root.path())).unwrap();
    let options =
        CrawlOptions::new("cats", 1).with_destination(format!("\"{}\"", custom.display()));
    let result = crawler
        .crawl(options, &NoopObserver, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.destination, custom);
    assert!(custom.join("cats_1.jpg").is_file());
    assert!(!root.path().join("cats").exists());
}

#[tokio::test]
async fn test_invalid_input_makes_no_requests() {
    let server = MockServer::start().await;
    let root = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let crawler = Crawler::new(create_test_config(&server, root.path())).unwrap();

    let empty_keyword = crawler
        .crawl(CrawlOptions::new("", 5), &NoopObserver, &CancellationToken::new())
        .await;
    assert!(matches!(empty_keyword, Err(SpiderError::InvalidInput(_))));

    let zero_target = crawler
        .crawl(CrawlOptions::new("cats", 0), &NoopObserver, &CancellationToken::new())
        .await;
    assert!(matches!(zero_target, Err(SpiderError::InvalidInput(_))));
}

#[tokio::test]
async fn test_spawned_crawl_reports_progress_and_can_be_cancelled() {
    let server = MockServer::start().await;
    let root = TempDir::new().unwrap();

    mount_page(&server, "0", &["/img/1.jpg", "/img/2.jpg", "/img/3.jpg"]).await;
    mount_image(&server, "/img/1.jpg", 200, 1).await;
    mount_image(&server, "/img/2.jpg", 200, 0).await;
    mount_image(&server, "/img/3.jpg", 200, 0).await;

    let crawler = Arc::new(Crawler::new(create_test_config(&server, root.path())).unwrap());
    let options = CrawlOptions::new("cats", 3).with_delay(Duration::from_secs(3600));
    let mut handle = spawn_crawl(crawler, options, CancellationToken::new());

    let first = handle.progress.recv().await.expect("Expected a progress event");
    assert_eq!((first.current, first.target), (1, 3));
    handle.cancel();

    assert!(handle.progress.recv().await.is_none());
    let result = tokio::time::timeout(Duration::from_secs(5), handle.task)
        .await
        .expect("Cancellation should end the crawl promptly")
        .unwrap()
        .unwrap();

    assert_eq!(result.total_downloaded, 1);
    assert_eq!(result.stop_reason, StopReason::Cancelled);
    assert_eq!(saved_files(&result.destination), vec!["cats_1.jpg"]);
}

#[tokio::test]
async fn test_keyword_with_reserved_characters() {
    let server = MockServer::start().await;
    let root = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/search/flip"))
        .and(query_param("word", "a/b:c"))
        .and(query_param("pn", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result_page(&server, &["/img/1.jpg"])))
        .mount(&server)
        .await;
    mount_image(&server, "/img/1.jpg", 200, 1).await;

    let crawler = Crawler::new(create_test_config(&server, root.path())).unwrap();
    let result = crawler
        .crawl(CrawlOptions::new("a/b:c", 1), &NoopObserver, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.destination, root.path().join("a_b_c"));
    assert_eq!(saved_files(&result.destination), vec!["a_b_c_1.jpg"]);
}
