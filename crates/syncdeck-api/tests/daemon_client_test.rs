#![allow(clippy::unwrap_used)]
// Integration tests for `DaemonClient` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use syncdeck_api::transport::DEFAULT_TIMEOUT;
use syncdeck_api::{DaemonClient, Error, TlsMode, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

/// A headerless client for `base_url` bounded by `timeout`.
fn client_with_timeout(base_url: &str, timeout: Duration) -> DaemonClient {
    let http = reqwest::Client::builder().timeout(timeout).build().unwrap();
    DaemonClient::with_client(http, Url::parse(base_url).unwrap(), timeout)
}

async fn setup() -> (MockServer, DaemonClient) {
    let server = MockServer::start().await;
    let client = client_with_timeout(&server.uri(), DEFAULT_TIMEOUT);
    (server, client)
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/system/status"))
        .and(header("X-API-Key", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "myID": "MYSELF-ID",
            "uptime": 42
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = TransportConfig {
        tls: TlsMode::System,
        timeout: Duration::from_secs(5),
    };
    let key = SecretString::from("s3cret".to_string());
    let client =
        DaemonClient::new(Url::parse(&server.uri()).unwrap(), &key, &transport).unwrap();

    let status = client.get_status().await.unwrap();
    assert_eq!(status.my_id, "MYSELF-ID");
    assert_eq!(status.extra.get("uptime"), Some(&json!(42)));
}

#[tokio::test]
async fn test_forbidden_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("CSRF Error"))
        .mount(&server)
        .await;

    let result = client.get_config::<Value>().await;
    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(message.contains("CSRF"), "unexpected message: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

// ── Configuration document ──────────────────────────────────────────

#[tokio::test]
async fn test_get_and_replace_config_roundtrip() {
    let (server, client) = setup().await;

    let doc = json!({
        "version": 37,
        "devices": [{ "deviceID": "AAA", "name": "laptop" }],
        "folders": [],
        "gui": { "enabled": true }
    });

    Mock::given(method("GET"))
        .and(path("/rest/system/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&doc))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/system/config"))
        .and(body_json(&doc))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let fetched: Value = client.get_config().await.unwrap();
    assert_eq!(fetched, doc);
    client.replace_config(&fetched).await.unwrap();
}

#[tokio::test]
async fn test_non_success_status_carries_upstream_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/system/config"))
        .respond_with(ResponseTemplate::new(500).set_body_string("config validation failed"))
        .mount(&server)
        .await;

    let result = client.replace_config(&json!({})).await;
    match result {
        Err(Error::Http { status, ref message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("config validation failed"));
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/system/connections"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client.get_connections().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unreachable_daemon_is_transport_error() {
    let client = client_with_timeout("http://127.0.0.1:1", DEFAULT_TIMEOUT);

    let result = client.get_status().await;
    assert!(result.is_err());
    assert!(result.unwrap_err().is_transient());
}

#[tokio::test]
async fn test_slow_daemon_reports_the_configured_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/system/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "myID": "X" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;
    let client = client_with_timeout(&server.uri(), Duration::from_millis(200));

    let err = client.get_status().await.unwrap_err();

    assert!(
        matches!(err, Error::Timeout { timeout } if timeout == Duration::from_millis(200)),
        "expected Timeout, got: {err:?}"
    );
    assert_eq!(err.to_string(), "Request timed out after 200ms");
    assert!(err.is_transient());
}

// ── Connections ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_connections() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/system/connections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connections": {
                "DEV-ONE": {
                    "connected": true,
                    "at": "2024-06-15T10:30:00Z",
                    "address": "10.0.0.2:22000",
                    "clientVersion": "v1.27.0"
                },
                "DEV-TWO": { "connected": false, "at": null }
            },
            "total": { "inBytesTotal": 0 }
        })))
        .mount(&server)
        .await;

    let conns = client.get_connections().await.unwrap();

    assert_eq!(conns.connections.len(), 2);
    let one = conns.get("DEV-ONE").unwrap();
    assert!(one.connected);
    assert_eq!(one.at.unwrap().to_rfc3339(), "2024-06-15T10:30:00+00:00");
    assert_eq!(one.extra.get("clientVersion"), Some(&json!("v1.27.0")));
    assert!(conns.get("DEV-TWO").unwrap().at.is_none());
    assert!(conns.extra.contains_key("total"));
}

// ── Folder db endpoints ─────────────────────────────────────────────

#[tokio::test]
async fn test_folder_status_uses_query_param() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/db/status"))
        .and(query_param("folder", "photos & more"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "idle",
            "globalFiles": 12
        })))
        .mount(&server)
        .await;

    let status = client.get_folder_status("photos & more").await.unwrap();
    assert_eq!(status["state"], "idle");
}

#[tokio::test]
async fn test_pause_and_resume_folder() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/db/pause"))
        .and(query_param("folder", "docs"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/db/resume"))
        .and(query_param("folder", "docs"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.pause_folder("docs").await.unwrap();
    client.resume_folder("docs").await.unwrap();
}

#[tokio::test]
async fn test_pause_unknown_folder_is_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/db/pause"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such folder"))
        .mount(&server)
        .await;

    let err = client.pause_folder("ghost").await.unwrap_err();
    assert!(err.is_not_found(), "expected 404, got: {err:?}");
}
