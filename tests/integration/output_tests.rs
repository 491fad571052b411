//! Integration tests for the results file

use page_gleaner::output::{load_results_json, JsonOutputHandler, OutputHandler};
use page_gleaner::scrape::{Fetcher, Orchestrator, ResultSet, RetryPolicy, ScrapeResult};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_results(count: usize) -> ResultSet {
    (0..count)
        .map(|i| ScrapeResult {
            url: format!("https://example.com/{}", i),
            title: format!("Title \"{}\" – ünïcödé", i),
            description: if i % 2 == 0 {
                String::new()
            } else {
                format!("Description {}\nwith a newline", i)
            },
            headers: (0..i).map(|h| format!("Header {}", h)).collect(),
        })
        .collect()
}

#[test]
fn test_output_round_trip() {
    let dir = TempDir::new().unwrap();
    let handler = JsonOutputHandler::new(dir.path().join("scraped_results.json"));
    let results = sample_results(5);

    handler.write_results(&results).unwrap();
    let loaded = load_results_json(handler.path()).unwrap();

    assert_eq!(loaded.len(), 5);
    for (original, reloaded) in results.iter().zip(&loaded) {
        assert_eq!(original.url, reloaded.url);
        assert_eq!(original.title, reloaded.title);
        assert_eq!(original.description, reloaded.description);
        assert_eq!(original.headers, reloaded.headers);
    }
}

#[test]
fn test_write_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be opened as the output file
    let handler = JsonOutputHandler::new(dir.path());

    assert!(handler.write_results(&sample_results(1)).is_err());
}

#[tokio::test]
async fn test_batch_to_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><title>Mock</title></head><body><h1>Top</h1></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let policy = RetryPolicy {
        max_attempts: 3,
        request_timeout: Duration::from_secs(2),
        backoff: Duration::from_millis(10),
    };
    let orchestrator = Orchestrator::new(Fetcher::new(reqwest::Client::new(), policy), None);
    let urls = [
        format!("{}/a", mock_server.uri()),
        format!("{}/b", mock_server.uri()),
    ];
    let report = orchestrator.run(&urls).await.unwrap();

    let dir = TempDir::new().unwrap();
    let handler = JsonOutputHandler::new(dir.path().join("out.json"));
    handler.write_results(&report.results).unwrap();

    let mut loaded = load_results_json(handler.path()).unwrap();
    loaded.sort_by(|a, b| a.url.cmp(&b.url));

    assert_eq!(loaded, report.results.sorted_by_url());
    assert!(loaded.iter().all(|r| r.title == "Mock" && r.description.is_empty()));
    assert!(loaded.iter().all(|r| r.headers == vec!["Top".to_string()]));
}
