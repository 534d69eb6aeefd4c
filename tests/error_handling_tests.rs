use axum::{http::StatusCode, routing::post, Router};
use chatkit_relay::domain::config::{Credentials, UpstreamConfig};
use chatkit_relay::{
    router, OpenAiSessionClient, RelayError, SessionApi, SessionBroker, UpstreamSessionRequest,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

const TEST_API_KEY: &str = "sk-test-key-123";

/// Spawn a bare upstream whose sessions route is the given handler.
async fn spawn_upstream(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    addr
}

fn session_client(upstream_addr: SocketAddr, timeout_secs: u64) -> OpenAiSessionClient {
    let upstream = UpstreamConfig {
        base_url: format!("http://{}", upstream_addr),
        timeout_secs,
    };
    OpenAiSessionClient::new(TEST_API_KEY, &upstream).unwrap()
}

async fn spawn_relay_over(client: OpenAiSessionClient) -> String {
    let credentials = Arc::new(Credentials {
        api_key: TEST_API_KEY.to_string(),
        workflow_id: Some("wf_123".to_string()),
        domain_public_key: None,
        frontend_url: None,
    });
    let broker = Arc::new(SessionBroker::new(credentials, Arc::new(client)));
    let app = router(broker);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    format!("http://{}", addr)
}

fn test_request() -> UpstreamSessionRequest {
    UpstreamSessionRequest::new("wf_123", "dev_abc")
}

/// Grab a local port with no listener behind it.
async fn unused_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

#[tokio::test]
async fn test_unreachable_upstream_is_unavailable() {
    let client = session_client(unused_addr().await, 2);

    let error = client.create_session(&test_request()).await.unwrap_err();

    match error {
        RelayError::UpstreamUnavailable { timed_out, .. } => assert!(!timed_out),
        other => panic!("Expected UpstreamUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_upstream_maps_to_502() {
    let base = spawn_relay_over(session_client(unused_addr().await, 2)).await;

    let response = reqwest::get(format!("{}/api/chatkit/session", base))
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().is_some());
}

#[tokio::test]
async fn test_slow_upstream_times_out_and_maps_to_504() {
    let app = Router::new().route(
        "/v1/chatkit/sessions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "too late"
        }),
    );
    let upstream_addr = spawn_upstream(app).await;

    let client = session_client(upstream_addr, 1);
    let error = client.create_session(&test_request()).await.unwrap_err();
    match error {
        RelayError::UpstreamUnavailable { timed_out, .. } => assert!(timed_out),
        other => panic!("Expected timeout, got {:?}", other),
    }

    let base = spawn_relay_over(session_client(upstream_addr, 1)).await;
    let response = reqwest::get(format!("{}/api/chatkit/session", base))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn test_upstream_success_with_non_json_body() {
    let app = Router::new().route("/v1/chatkit/sessions", post(|| async { "not json at all" }));
    let upstream_addr = spawn_upstream(app).await;

    let client = session_client(upstream_addr, 2);
    let error = client.create_session(&test_request()).await.unwrap_err();
    assert!(matches!(error, RelayError::UpstreamContractViolation(_)));

    let base = spawn_relay_over(session_client(upstream_addr, 2)).await;
    let response = reqwest::get(format!("{}/api/chatkit/session", base))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_upstream_5xx_status_passes_through() {
    let app = Router::new().route(
        "/v1/chatkit/sessions",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
    );
    let upstream_addr = spawn_upstream(app).await;

    let client = session_client(upstream_addr, 2);
    let error = client.create_session(&test_request()).await.unwrap_err();
    match &error {
        RelayError::UpstreamError { status, body } => {
            assert_eq!(*status, 503);
            // The raw body is kept for server-side logging only.
            assert_eq!(body, "overloaded");
        }
        other => panic!("Expected UpstreamError, got {:?}", other),
    }

    let base = spawn_relay_over(session_client(upstream_addr, 2)).await;
    let response = reqwest::get(format!("{}/api/chatkit/session", base))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    let text = response.text().await.unwrap();
    assert!(!text.contains("overloaded"));
}

#[tokio::test]
async fn test_failure_payload_shape() {
    let base = spawn_relay_over(session_client(unused_addr().await, 1)).await;

    let response = reqwest::get(format!("{}/api/chatkit/session", base))
        .await
        .unwrap();

    let body: serde_json::Value = response.json().await.unwrap();
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert!(object.contains_key("detail"));
}
