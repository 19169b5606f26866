use reqwest::header::ACCEPT;
use senate_trades_core::{decode_response, ApiError, Payload, PendingRequest};
use std::time::Duration;

/// HTTP side of the dashboard: runs a page's pending request and decodes the reply.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("senate_trades_tui/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { http })
    }

    pub async fn fetch(&self, request: &PendingRequest) -> Result<Payload, ApiError> {
        tracing::debug!(url = %request.url, "GET");
        let response = self
            .http
            .get(&request.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        decode_response(
            request.channel(),
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            &body,
        )
    }
}

fn transport(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Transport("request timed out".to_string())
    } else {
        ApiError::Transport(error.to_string())
    }
}
