//! HTTP fetcher tests against a mock server

use crate::common::*;
use home_harvest::config::{FetchConfig, Region};
use home_harvest::harvest::{DetailHarvester, FetchResult, Fetcher, HttpFetcher};
use home_harvest::store::DirectoryStore;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_config() -> FetchConfig {
    FetchConfig {
        connect_timeout_ms: 500,
        read_timeout_ms: 500,
        ..FetchConfig::default()
    }
}

#[tokio::test]
async fn test_success_body_returned() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/home/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&fast_config()).unwrap();
    let result = fetcher
        .fetch(&format!("{}/home/1", mock_server.uri()))
        .await;

    assert_eq!(
        result,
        FetchResult::Response {
            status_code: 200,
            body: "<html>ok</html>".to_string()
        }
    );
}

#[tokio::test]
async fn test_error_status_keeps_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&fast_config()).unwrap();
    let result = fetcher
        .fetch(&format!("{}/home/missing", mock_server.uri()))
        .await;

    assert_eq!(result.status_code(), Some(404));
    assert_eq!(result.body(), "not here");
    assert!(!result.is_success());
}

#[tokio::test]
async fn test_browser_headers_sent() {
    let config = FetchConfig {
        user_agent: "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/115.0".to_string(),
        accept_language: "en-GB".to_string(),
        ..fast_config()
    };

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", config.user_agent.as_str()))
        .and(header("accept-language", "en-GB"))
        .and(header("cache-control", "max-age=0"))
        .and(header("upgrade-insecure-requests", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&config).unwrap();
    let result = fetcher.fetch(&format!("{}/", mock_server.uri())).await;

    // Unmatched requests get 404 from wiremock
    assert_eq!(result.status_code(), Some(200));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&fast_config()).unwrap();
    let result = fetcher.fetch(&format!("{}/slow", mock_server.uri())).await;

    assert_eq!(result, FetchResult::Timeout);
    assert_eq!(result.body(), "");
}

/// Serves one response whose body is sent a byte at a time, `gap` apart
async fn spawn_trickle_server(body: &'static [u8], gap: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;

        let head = format!(
            "HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
            body.len()
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.flush().await.unwrap();

        for byte in body {
            tokio::time::sleep(gap).await;
            if socket.write_all(&[*byte]).await.is_err() {
                return;
            }
            let _ = socket.flush().await;
        }
    });

    format!("http://{}/listing.csv", addr)
}

#[tokio::test]
async fn test_steady_slow_body_is_not_cut_off() {
    // 10 bytes 200ms apart: 2s in total, never silent for 500ms
    let url = spawn_trickle_server(b"0123456789", Duration::from_millis(200)).await;

    let fetcher = HttpFetcher::new(&fast_config()).unwrap();
    let result = fetcher.fetch(&url).await;

    assert_eq!(
        result,
        FetchResult::Response {
            status_code: 200,
            body: "0123456789".to_string()
        }
    );
}

#[tokio::test]
async fn test_stalled_body_times_out() {
    let url = spawn_trickle_server(b"01", Duration::from_secs(2)).await;

    let fetcher = HttpFetcher::new(&fast_config()).unwrap();
    let result = fetcher.fetch(&url).await;

    assert_eq!(result, FetchResult::Timeout);
}

#[tokio::test]
async fn test_refused_connection_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let fetcher = HttpFetcher::new(&fast_config()).unwrap();
    let result = fetcher
        .fetch(&format!("http://127.0.0.1:{}/home/1", port))
        .await;

    assert!(matches!(result, FetchResult::NetworkError { .. }));
    assert_eq!(result.status_code(), None);
}

#[tokio::test]
async fn test_detail_harvest_over_http() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/home/aaa"))
        .respond_with(ResponseTemplate::new(200).set_body_string("X"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/home/bbb"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let aaa = format!("{}/home/aaa", base);
    let bbb = format!("{}/home/bbb", base);
    write_listing(dir.path(), 17420, &[aaa.as_str(), bbb.as_str()]);

    let mut config = test_config(vec![Region::city("San Jose", 17420)]);
    config.fetch = fast_config();

    let mut harvester = DetailHarvester::new(
        &config,
        HttpFetcher::new(&config.fetch).unwrap(),
        RecordingPacer::default(),
        DirectoryStore::new(dir.path()),
    );
    let report = harvester.run().await;

    assert_eq!((report.total(), report.failed(), report.skipped()), (2, 1, 0));
    assert_eq!(file_names(dir.path()), vec!["17420.csv", "aaa"]);
    assert_eq!(std::fs::read_to_string(dir.path().join("aaa")).unwrap(), "X");
}
