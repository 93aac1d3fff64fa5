//! Tests for the HTTP client module

use super::*;
use crate::Error;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.default_headers.is_empty());
    assert!(config.user_agent.starts_with("windowfetch/"));
}

#[test]
fn test_http_client_config_builder() {
    let mut bag = crate::types::HeaderBag::new();
    bag.insert("Client-Id".to_string(), "42".to_string());
    bag.insert("Api-Key".to_string(), "secret".to_string());

    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .headers(&bag)
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.default_headers.len(), 3);
    assert_eq!(
        config.default_headers.get("Api-Key"),
        Some(&"secret".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_build_url() {
    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .base_url("https://api.example.com/")
            .build(),
    )
    .unwrap();

    assert_eq!(
        client.build_url("/v2/posting/fbo/list"),
        "https://api.example.com/v2/posting/fbo/list"
    );
    assert_eq!(
        client.build_url("v2/posting/fbo/list"),
        "https://api.example.com/v2/posting/fbo/list"
    );
    assert_eq!(
        client.build_url("http://other.example.com/x"),
        "http://other.example.com/x"
    );
}

#[test]
fn test_resolve_url_matches_build_url() {
    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .base_url("https://api.example.com")
            .build(),
    )
    .unwrap();
    let transport: &dyn Transport = &client;

    assert_eq!(
        transport.resolve_url("/v1/rating/summary"),
        "https://api.example.com/v1/rating/summary"
    );
}

#[tokio::test]
async fn test_get_json_sends_headers_without_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/supplier/available_warehouses"))
        .and(header("Api-Key", "secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": [{"warehouse": {"id": 1, "name": "A"}}]})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .base_url(mock_server.uri())
            .header("Api-Key", "secret")
            .build(),
    )
    .unwrap();

    let response = client
        .get_json("/v1/supplier/available_warehouses")
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body["result"][0]["warehouse"]["name"], "A");
}

#[tokio::test]
async fn test_post_json_sends_body_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/posting/fbo/list"))
        .and(header("Client-Id", "42"))
        .and(header("Api-Key", "secret"))
        .and(body_json(json!({"offset": 0, "limit": 1000})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .base_url(mock_server.uri())
            .header("Client-Id", "42")
            .header("Api-Key", "secret")
            .build(),
    )
    .unwrap();

    let response = client
        .post_json("/v2/posting/fbo/list", &json!({"offset": 0, "limit": 1000}))
        .await
        .unwrap();

    assert_eq!(response, JsonResponse::ok(json!({"result": []})));
}

#[tokio::test]
async fn test_post_json_keeps_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/finance/transaction/list"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"code": 3, "message": "bad date"})),
        )
        .mount(&mock_server)
        .await;

    let client =
        HttpClient::with_config(HttpClientConfig::builder().base_url(mock_server.uri()).build())
            .unwrap();

    let response = client
        .post_json("/v3/finance/transaction/list", &json!({}))
        .await
        .unwrap();

    assert_eq!(response.status, 400);
    assert_eq!(response.body["message"], "bad date");
}

#[tokio::test]
async fn test_post_json_non_json_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let client =
        HttpClient::with_config(HttpClientConfig::builder().base_url(mock_server.uri()).build())
            .unwrap();

    let response = client.post_json("/x", &json!({})).await.unwrap();
    assert_eq!(response.status, 502);
    assert_eq!(response.body, json!("Bad Gateway"));
}

#[tokio::test]
async fn test_post_json_invalid_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let client =
        HttpClient::with_config(HttpClientConfig::builder().base_url(mock_server.uri()).build())
            .unwrap();

    let err = client.post_json("/x", &json!({})).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_post_json_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": []}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .base_url(mock_server.uri())
            .timeout(Duration::from_millis(50))
            .build(),
    )
    .unwrap();

    let err = client.post_json("/slow", &json!({})).await.unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_ms: 50, .. }));
    assert!(err.is_connection());
}

#[tokio::test]
async fn test_post_json_connection_refused() {
    // Grab a free port, then drop the listener so nothing answers
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .base_url(format!("http://{addr}"))
            .build(),
    )
    .unwrap();

    let err = client.post_json("/x", &json!({})).await.unwrap_err();
    assert!(matches!(err, Error::Connection { .. }));
}
