use crate::core::broker::device::resolve_device_id;
use crate::core::upstream::{SessionApi, UpstreamSessionRequest};
use crate::domain::config::Credentials;
use crate::domain::error::{RelayError, RelayResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Inbound session-creation request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionRequest {
    /// Caller-supplied device identifier, if any
    #[serde(default)]
    pub device_id: Option<String>,
}

/// Successful broker result handed back to the caller
#[derive(Debug, Clone, Serialize)]
pub struct BrokerResponse {
    /// Short-lived credential the frontend uses to open its own
    /// realtime connection with the upstream provider
    pub client_secret: String,
}

/// Health report for the relay process
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub workflow_id_set: bool,
    pub api_key_set: bool,
}

/// Stateless broker between the HTTP surface and the upstream session API.
///
/// Holds immutable credentials and an injected [`SessionApi`]; safe to
/// share behind `Arc` across concurrent requests. Each call issues at
/// most one outbound request and keeps nothing afterwards.
pub struct SessionBroker {
    credentials: Arc<Credentials>,
    api: Arc<dyn SessionApi>,
}

impl SessionBroker {
    /// Create a broker over the given credentials and upstream seam.
    pub fn new(credentials: Arc<Credentials>, api: Arc<dyn SessionApi>) -> Self {
        Self { credentials, api }
    }

    /// Create one upstream session and return its client secret.
    ///
    /// Fails with `Misconfigured` before any outbound call when no
    /// workflow id is configured. Repeating the call creates a new,
    /// independent upstream session each time; there is no reuse.
    pub async fn create_session(&self, request: SessionRequest) -> RelayResult<BrokerResponse> {
        let workflow_id = self
            .credentials
            .workflow_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| RelayError::missing_setting("CHATKIT_WORKFLOW_ID"))?;

        let device_id = resolve_device_id(request.device_id.as_deref());
        info!(
            "Creating chat session for workflow '{}', device '{}'",
            workflow_id, device_id
        );

        let upstream_request = UpstreamSessionRequest::new(workflow_id, device_id);
        let response = self.api.create_session(&upstream_request).await?;

        // The session id is diagnostic only and never leaves the server.
        match &response.id {
            Some(id) => info!("Upstream session created: {}", id),
            None => info!("Upstream session created (no id in response)"),
        }

        let client_secret = response.client_secret.ok_or_else(|| {
            warn!("Upstream returned success without a client_secret; API contract may have drifted");
            RelayError::UpstreamContractViolation("response is missing client_secret".to_string())
        })?;

        Ok(BrokerResponse { client_secret })
    }

    /// Report which credentials the process is running with.
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "ok",
            workflow_id_set: self
                .credentials
                .workflow_id
                .as_deref()
                .is_some_and(|id| !id.is_empty()),
            api_key_set: !self.credentials.api_key.is_empty(),
        }
    }
}
