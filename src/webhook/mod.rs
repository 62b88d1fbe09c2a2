pub mod client;

use crate::{
    config::{DIAGNOSTIC_EXCERPT_CHARS, ERROR_EXCERPT_CHARS},
    error::{GenerationError, Result},
    models::{is_image_content_type, ImagePayload},
};
use async_trait::async_trait;

pub use client::ReqwestTransport;

/// A fully read webhook response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl WebhookResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as text; invalid UTF-8 is replaced rather than rejected.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The HTTP seam between the orchestrator and the network.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// POST `body` as `application/json` to `url` and read the whole response.
    /// Only failures to reach the server or read the body are errors here.
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<WebhookResponse>;
}

#[async_trait]
impl<T: WebhookTransport + ?Sized> WebhookTransport for std::sync::Arc<T> {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<WebhookResponse> {
        (**self).post_json(url, body).await
    }
}

/// Turn a webhook response into an image payload or the error it represents.
pub fn classify(response: WebhookResponse) -> Result<ImagePayload> {
    log::info!("Response status from webhook: {}", response.status);
    log::info!(
        "Response Content-Type from webhook: {}",
        response.content_type.as_deref().unwrap_or("<missing>")
    );

    if !response.is_success() {
        let text = response.text();
        log::error!("Error from webhook workflow: {}", text);
        return Err(GenerationError::Server {
            status: response.status,
            excerpt: excerpt(&text, ERROR_EXCERPT_CHARS),
        });
    }

    let is_image = response
        .content_type
        .as_deref()
        .map_or(false, is_image_content_type);
    if !is_image {
        log::error!(
            "Webhook did not return an image. Received Content-Type: {}",
            response.content_type.as_deref().unwrap_or("<missing>")
        );
        log::error!(
            "Response text from webhook: {}",
            excerpt(&response.text(), DIAGNOSTIC_EXCERPT_CHARS)
        );
        return Err(GenerationError::ContractViolation {
            content_type: response.content_type,
        });
    }
    let content_type = response.content_type.unwrap_or_default();

    log::debug!("Image payload: {} ({} bytes)", content_type, response.body.len());

    if response.body.is_empty() {
        log::error!("Received an empty image body from the webhook");
        return Err(GenerationError::EmptyPayload);
    }

    Ok(ImagePayload {
        content_type,
        data: response.body,
    })
}

/// First `max_chars` characters of `text`, with `...` appended when something was cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
