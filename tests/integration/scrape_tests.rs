//! Integration tests for the scrape pipeline
//!
//! These tests use wiremock to create mock HTTP servers and run whole
//! batches end-to-end: retries, recovery, partial failure and aggregation.

use page_gleaner::scrape::{Fetcher, Orchestrator, RetryPolicy};
use page_gleaner::FetchError;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BACKOFF: Duration = Duration::from_millis(50);

/// A fetcher with the reference attempt budget and a short backoff
fn test_fetcher() -> Fetcher {
    let policy = RetryPolicy {
        max_attempts: 3,
        request_timeout: Duration::from_secs(2),
        backoff: BACKOFF,
    };
    Fetcher::new(reqwest::Client::new(), policy)
}

fn page(title: &str, description: &str, headers: &[&str]) -> String {
    let headers: String = headers
        .iter()
        .map(|header| format!("<h1>{}</h1>", header))
        .collect();
    format!(
        r#"<html><head><title>{}</title><meta name="description" content="{}"></head><body>{}</body></html>"#,
        title, description, headers
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_retry_exhaustion_on_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let url = format!("{}/broken", mock_server.uri());
    let start = Instant::now();
    let err = test_fetcher().fetch(&url).await.unwrap_err();

    // Two waits between three attempts
    assert!(start.elapsed() >= BACKOFF * 2);
    match err {
        FetchError::Exhausted { url: failed, attempts, last } => {
            assert_eq!(failed, url);
            assert_eq!(attempts, 3);
            assert!(last.to_string().contains("500"));
        }
    }
}

#[tokio::test]
async fn test_exhausted_url_produces_no_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let url = format!("{}/broken", mock_server.uri());
    let orchestrator = Orchestrator::new(test_fetcher(), None);
    let report = orchestrator.run(&[url.clone()]).await.unwrap();

    assert!(report.results.is_empty());
    assert_eq!(report.stats.skipped_count(), 1);
    assert_eq!(report.stats.skipped[0].url, url);
}

#[tokio::test]
async fn test_non_200_success_status_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/no-content"))
        .respond_with(ResponseTemplate::new(204))
        .expect(3)
        .mount(&mock_server)
        .await;

    let url = format!("{}/no-content", mock_server.uri());
    assert!(test_fetcher().fetch(&url).await.is_err());
}

#[tokio::test]
async fn test_recovery_on_second_attempt() {
    let mock_server = MockServer::start().await;

    // The first mounted mock answers once, then falls through to the second
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("Flaky", "", &["Back"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/flaky", mock_server.uri());
    let orchestrator = Orchestrator::new(test_fetcher(), None);
    let report = orchestrator.run(&[url.clone()]).await.unwrap();

    assert_eq!(report.results.len(), 1);
    let result = report.results.get(&url).expect("missing result");
    assert_eq!(result.title, "Flaky");
    assert_eq!(result.headers, vec!["Back".to_string()]);
}

#[tokio::test]
async fn test_batch_partial_failure() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/one", page("One", "First page", &["Alpha"])).await;
    mount_page(&mock_server, "/two", page("Two", "Second page", &[])).await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&mock_server)
        .await;

    let urls = vec![
        format!("{}/one", base_url),
        format!(" {}/down ", base_url),
        format!("{}/two  ", base_url),
    ];

    let orchestrator = Orchestrator::new(test_fetcher(), None);
    let report = orchestrator.run(&urls).await.unwrap();

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.stats.dispatched, 3);
    assert_eq!(report.stats.scraped, 2);
    assert_eq!(report.stats.skipped.len(), 1);
    assert_eq!(report.stats.skipped[0].url, format!("{}/down", base_url));

    let one = report.results.get(&format!("{}/one", base_url)).unwrap();
    assert_eq!(one.description, "First page");
    assert_eq!(one.headers, vec!["Alpha".to_string()]);

    // Stored under the trimmed URL
    let two = report.results.get(&format!("{}/two", base_url)).unwrap();
    assert_eq!(two.title, "Two");
    assert!(two.headers.is_empty());
}

#[tokio::test]
async fn test_extraction_over_http() {
    let mock_server = MockServer::start().await;

    let body = r#"<html><head>
        <title>Example</title>
        <meta name="description" content="A sample page">
    </head><body>
        <h1>  Hello  </h1>
        <h1></h1>
    </body></html>"#;
    mount_page(&mock_server, "/", body.to_string()).await;

    let url = format!("{}/", mock_server.uri());
    let report = Orchestrator::new(test_fetcher(), None)
        .run(&[url.clone()])
        .await
        .unwrap();

    let result = report.results.get(&url).unwrap();
    assert_eq!(result.title, "Example");
    assert_eq!(result.description, "A sample page");
    assert_eq!(result.headers, vec!["Hello".to_string()]);
}

#[tokio::test]
async fn test_aggregation_is_order_independent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let mut urls = Vec::new();
    for i in 0..8 {
        let route = format!("/page{}", i);
        let title = format!("Page {}", i);
        let header = format!("H{}", i);
        Mock::given(method("GET"))
            .and(path(route.as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(page(&title, "", &[header.as_str()]))
                    // Uneven delays shuffle completion order between runs
                    .set_delay(Duration::from_millis(((i * 37) % 5) as u64 * 10)),
            )
            .mount(&mock_server)
            .await;
        urls.push(format!("{}{}", base_url, route));
    }

    let orchestrator = Orchestrator::new(test_fetcher(), None);
    let first = orchestrator.run(&urls).await.unwrap();
    let second = orchestrator.run(&urls).await.unwrap();

    assert_eq!(first.results.len(), 8);
    assert_eq!(first.results.sorted_by_url(), second.results.sorted_by_url());
}

#[tokio::test]
async fn test_concurrency_limit_bounds_in_flight_fetches() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let delay = Duration::from_millis(100);

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page("Same", "", &[]))
                .set_delay(delay),
        )
        .expect(6)
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = (0..6).map(|i| format!("{}/p{}", base_url, i)).collect();
    let orchestrator = Orchestrator::new(test_fetcher(), Some(2));

    let start = Instant::now();
    let report = orchestrator.run(&urls).await.unwrap();

    // Six fetches, two at a time: at least three delay rounds
    assert!(
        start.elapsed() >= delay * 3,
        "cap of 2 finished in {:?}",
        start.elapsed()
    );
    assert_eq!(report.results.len(), 6);
    assert_eq!(report.stats.skipped_count(), 0);
}

#[tokio::test]
async fn test_request_timeout_counts_as_failed_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page("Slow", "", &[]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let policy = RetryPolicy {
        max_attempts: 2,
        request_timeout: Duration::from_millis(100),
        backoff: Duration::from_millis(10),
    };
    let fetcher = Fetcher::new(reqwest::Client::new(), policy);

    let url = format!("{}/slow", mock_server.uri());
    match fetcher.fetch(&url).await.unwrap_err() {
        FetchError::Exhausted { attempts, last, .. } => {
            assert_eq!(attempts, 2);
            assert!(matches!(last, page_gleaner::AttemptError::Timeout(_)));
        }
    }
}
