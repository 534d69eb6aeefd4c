use crate::domain::error::RelayResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Workflow reference carried on every session-creation call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowRef {
    pub id: String,
}

/// Outbound session-creation request.
///
/// Serializes to the exact wire shape the upstream API expects:
/// `{"workflow":{"id":"..."},"user":"..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpstreamSessionRequest {
    pub workflow: WorkflowRef,
    pub user: String,
}

impl UpstreamSessionRequest {
    /// Build a request for the given workflow and resolved device id.
    pub fn new(workflow_id: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            workflow: WorkflowRef {
                id: workflow_id.into(),
            },
            user: user.into(),
        }
    }
}

/// Upstream session-creation response.
///
/// Both fields are deliberately optional: deciding whether a missing
/// `client_secret` is a contract violation is the broker's job, not the
/// deserializer's.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamSessionResponse {
    /// Opaque session identifier, logged server-side only
    #[serde(default)]
    pub id: Option<String>,
    /// Short-lived credential handed back to the frontend
    #[serde(default)]
    pub client_secret: Option<String>,
}

/// Seam between the broker and the upstream session-creation API.
///
/// The production implementation lives in `infrastructure::openai`;
/// tests substitute counting or canned-response mocks.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Issue one session-creation call. No retries at this layer.
    async fn create_session(
        &self,
        request: &UpstreamSessionRequest,
    ) -> RelayResult<UpstreamSessionResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = UpstreamSessionRequest::new("wf_123", "dev_abc");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"workflow": {"id": "wf_123"}, "user": "dev_abc"})
        );
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: UpstreamSessionResponse = serde_json::from_str("{}").unwrap();
        assert!(response.id.is_none());
        assert!(response.client_secret.is_none());
    }

    #[test]
    fn test_response_full_payload() {
        let response: UpstreamSessionResponse =
            serde_json::from_str(r#"{"id":"sess_1","client_secret":"secret_xyz","object":"chatkit.session"}"#)
                .unwrap();
        assert_eq!(response.id.as_deref(), Some("sess_1"));
        assert_eq!(response.client_secret.as_deref(), Some("secret_xyz"));
    }
}
