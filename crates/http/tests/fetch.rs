//! Download tests against a mock HTTP server.

use sheetpick_http::{HttpClient, HttpError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_bytes_returns_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/sample.xlsx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x50, 0x4b, 0x03, 0x04]))
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let url = format!("{}/files/sample.xlsx", server.uri());
    let body = client.fetch_bytes(&url).await.unwrap();

    assert_eq!(body, vec![0x50, 0x4b, 0x03, 0x04]);
}

#[tokio::test]
async fn test_fetch_bytes_rejects_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing.xlsx"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let url = format!("{}/missing.xlsx", server.uri());
    let err = client.fetch_bytes(&url).await.unwrap_err();

    assert!(matches!(err, HttpError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_fetch_bytes_reports_transport_failure() {
    let client = HttpClient::with_timeout(2).unwrap();
    // Port 9 (discard) on localhost is not expected to accept HTTP.
    let err = client
        .fetch_bytes("http://127.0.0.1:9/file.xlsx")
        .await
        .unwrap_err();

    match err {
        HttpError::Request { url, .. } => assert_eq!(url, "http://127.0.0.1:9/file.xlsx"),
        other => panic!("Expected request error, got {other:?}"),
    }
}
