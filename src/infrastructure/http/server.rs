use crate::core::broker::{BrokerResponse, HealthStatus, SessionBroker, SessionRequest};
use crate::domain::error::{RelayError, RelayResult};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

/// Shared handler state
#[derive(Clone)]
struct AppState {
    broker: Arc<SessionBroker>,
}

/// HTTP front end dispatching into the session broker
pub struct RelayServer {
    broker: Arc<SessionBroker>,
}

impl RelayServer {
    /// Create a server over the given broker.
    pub fn new(broker: Arc<SessionBroker>) -> Self {
        Self { broker }
    }

    /// Serve until ctrl-c.
    pub async fn run(&self, addr: SocketAddr) -> RelayResult<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Relay server listening on {}", addr);

        axum::serve(listener, router(self.broker.clone()).into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Build the relay router; exposed separately so tests can serve it on
/// an ephemeral port.
pub fn router(broker: Arc<SessionBroker>) -> Router {
    let state = AppState { broker };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(
            "/api/chatkit/session",
            get(create_session_get).post(create_session_post),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    } else {
        info!("Shutdown signal received");
    }
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "ChatKit relay API",
        "endpoints": {
            "health": "/health",
            "create_session": "/api/chatkit/session (GET or POST)",
        },
    }))
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.broker.health())
}

async fn create_session_get(
    State(state): State<AppState>,
    Query(request): Query<SessionRequest>,
) -> Result<Json<BrokerResponse>, ApiError> {
    let response = state.broker.create_session(request).await?;
    Ok(Json(response))
}

async fn create_session_post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BrokerResponse>, ApiError> {
    // Permissive by contract: a missing, empty, or malformed body means
    // "no device id supplied", never a caller-facing error.
    let request = match parse_session_body(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!("Treating request as having no device id: {}", e);
            SessionRequest::default()
        }
    };

    let response = state.broker.create_session(request).await?;
    Ok(Json(response))
}

fn parse_session_body(body: &[u8]) -> RelayResult<SessionRequest> {
    if body.is_empty() {
        return Ok(SessionRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| RelayError::MalformedRequest(e.to_string()))
}

/// Boundary wrapper mapping [`RelayError`] onto HTTP responses.
///
/// Caller-visible messages stay generic; status, bodies, and secrets
/// are logged server-side where the error was raised.
struct ApiError(RelayError);

impl From<RelayError> for ApiError {
    fn from(error: RelayError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = status_and_detail(&self.0);
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

fn status_and_detail(error: &RelayError) -> (StatusCode, String) {
    match error {
        // Names the missing setting, never a value.
        RelayError::Misconfigured { .. } => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()),
        RelayError::UpstreamUnavailable { timed_out: true, .. } => (
            StatusCode::GATEWAY_TIMEOUT,
            "Timed out waiting for the upstream session service".to_string(),
        ),
        RelayError::UpstreamUnavailable { .. } => (
            StatusCode::BAD_GATEWAY,
            "Could not reach the upstream session service".to_string(),
        ),
        RelayError::UpstreamError { status, .. } => {
            // An upstream 4xx means our own request was rejected, which
            // is a gateway fault from the caller's view; upstream 5xx
            // statuses pass through.
            let status = StatusCode::from_u16(*status)
                .ok()
                .filter(StatusCode::is_server_error)
                .unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                "The upstream session service rejected the request".to_string(),
            )
        }
        RelayError::UpstreamContractViolation(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Received an unexpected response from the upstream session service".to_string(),
        ),
        RelayError::MalformedRequest(_) => (
            StatusCode::BAD_REQUEST,
            "Request body is not valid JSON".to_string(),
        ),
        RelayError::Config { .. } | RelayError::Io(_) | RelayError::Output(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        ),
    }
}
