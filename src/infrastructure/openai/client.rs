use crate::core::upstream::{SessionApi, UpstreamSessionRequest, UpstreamSessionResponse};
use crate::domain::{
    config::UpstreamConfig,
    error::{RelayError, RelayResult},
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, warn};

const SESSIONS_PATH: &str = "/v1/chatkit/sessions";
const BETA_HEADER_NAME: &str = "OpenAI-Beta";
const BETA_HEADER_VALUE: &str = "chatkit_beta=v1";

/// ChatKit session client backed by the OpenAI REST API.
///
/// One bounded-timeout POST per [`SessionApi::create_session`] call; no
/// retries. The underlying `reqwest::Client` pools connections and is
/// cheap to clone, so concurrent requests never serialize on it.
#[derive(Clone)]
pub struct OpenAiSessionClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiSessionClient {
    /// Create a client for the configured upstream.
    pub fn new(api_key: impl Into<String>, upstream: &UpstreamConfig) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(upstream.timeout_secs))
            .build()
            .map_err(|e| RelayError::Config {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: format!("{}{}", upstream.base_url.trim_end_matches('/'), SESSIONS_PATH),
        })
    }
}

#[async_trait]
impl SessionApi for OpenAiSessionClient {
    async fn create_session(
        &self,
        request: &UpstreamSessionRequest,
    ) -> RelayResult<UpstreamSessionResponse> {
        debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header(BETA_HEADER_NAME, BETA_HEADER_VALUE)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let timed_out = e.is_timeout();
                if timed_out {
                    warn!("Upstream session call timed out: {}", e);
                } else {
                    error!("Upstream session call failed: {}", e);
                }
                RelayError::UpstreamUnavailable {
                    message: e.to_string(),
                    timed_out,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Full body stays in server-side logs for diagnostics.
            error!("Upstream rejected session call: status={}, body={}", status, body);
            return Err(RelayError::UpstreamError {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<UpstreamSessionResponse>().await.map_err(|e| {
            error!("Upstream returned success with an undecodable body: {}", e);
            RelayError::UpstreamContractViolation(format!("response body is not valid JSON: {}", e))
        })
    }
}
