//! HTTP exchange used by the providers.

use crate::config::ProviderConfig;
use crate::providers::ProviderError;
use tracing::debug;

/// Status code and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one GET request. Non-success statuses are returned, not raised;
/// only failures to complete the exchange are errors.
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse, ProviderError>;
}

/// Blocking transport backed by a shared `ureq` agent
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(config: &ProviderConfig) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(config.timeout))
                .user_agent(config.user_agent.as_str())
                .http_status_as_error(false)
                .build(),
        );
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, ProviderError> {
        debug!(url, "GET");

        let resp = self
            .agent
            .get(url)
            .call()
            .map_err(|e| ProviderError::Transport(format!("Failed to fetch {}: {}", url, e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .into_body()
            .read_to_string()
            .map_err(|e| ProviderError::Transport(format!("Failed to read {}: {}", url, e)))?;

        Ok(HttpResponse { status, body })
    }
}
