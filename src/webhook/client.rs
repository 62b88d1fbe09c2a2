use crate::{
    error::{GenerationError, Result},
    webhook::{WebhookResponse, WebhookTransport},
};
use async_trait::async_trait;
use reqwest::{header, Client};

/// [`WebhookTransport`] backed by a shared `reqwest` client.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WebhookTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<WebhookResponse> {
        let payload = serde_json::to_vec(body)
            .map_err(|e| GenerationError::Transport(format!("could not encode request: {}", e)))?;

        log::debug!("POST {} ({} bytes)", url, payload.len());

        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Webhook request failed: {:?}", e);
                GenerationError::Transport(e.to_string())
            })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        let body = response
            .bytes()
            .await
            .map_err(|e| GenerationError::Transport(format!("failed to read response body: {}", e)))?;

        Ok(WebhookResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}
