//! Tests for the HTTP transport module

use super::*;
use crate::config::HarvestConfig;
use crate::error::Error;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport() -> HttpTransport {
    HttpTransport::with_config(HttpTransportConfig {
        rate_limiter: None,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_transport_config_default() {
    let config = HttpTransportConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.user_agent.starts_with("solidafy-harvest/"));
    assert!(config.rate_limiter.is_some());
}

#[test]
fn test_transport_config_from_harvest_config() {
    let mut harvest = HarvestConfig::new("tok").without_rate_limit();
    harvest.timeout_secs = 5;
    harvest.user_agent = "test-agent/1.0".to_string();

    let config = HttpTransportConfig::from(&harvest);
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert!(config.rate_limiter.is_none());

    let transport = HttpTransport::from_config(&HarvestConfig::new("tok")).unwrap();
    assert!(transport.has_rate_limiter());
}

#[test]
fn test_response_is_success() {
    assert!(HttpResponse::new(200, "").is_success());
    assert!(HttpResponse::new(204, "").is_success());
    assert!(!HttpResponse::new(301, "").is_success());
    assert!(!HttpResponse::new(404, "").is_success());
}

#[tokio::test]
async fn test_get_returns_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/users"))
        .and(query_param("is_active", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [{"id": 1, "first_name": "Alice"}]
        })))
        .mount(&mock_server)
        .await;

    let response = transport()
        .get(&format!("{}/v2/users?is_active=true", mock_server.uri()), &[])
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert!(response.body.contains("Alice"));
}

#[tokio::test]
async fn test_get_sends_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/clients"))
        .and(header("Authorization", "Bearer tok"))
        .and(header("Harvest-Account-ID", "42"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&mock_server)
        .await;

    let headers = HarvestConfig::new("tok").with_account_id("42").headers();
    let response = transport()
        .get(&format!("{}/v2/clients", mock_server.uri()), &headers)
        .await
        .unwrap();

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/projects/1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let response = transport()
        .get(&format!("{}/v2/projects/1", mock_server.uri()), &[])
        .await
        .unwrap();

    assert_eq!(response, HttpResponse::new(404, "Not found"));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/tasks"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = transport()
        .get(&format!("{}/v2/tasks", mock_server.uri()), &[])
        .await
        .unwrap();

    assert_eq!(response.status, 503);
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Nothing listens on port 9 of localhost in test environments
    let err = transport()
        .get("http://127.0.0.1:9/v2/users", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport { .. }));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::with_config(HttpTransportConfig {
        timeout: Duration::from_millis(50),
        rate_limiter: None,
        ..Default::default()
    })
    .unwrap();

    let err = transport
        .get(&format!("{}/v2/slow", mock_server.uri()), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport { ref message } if message.contains("timed out")));
}

#[test]
fn test_transport_debug() {
    let debug_str = format!("{:?}", transport());
    assert!(debug_str.contains("HttpTransport"));
    assert!(debug_str.contains("has_rate_limiter"));
}
