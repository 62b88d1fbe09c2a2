use crate::{
    config::WebhookConfig,
    error::{GenerationError, Result},
    logger,
    models::{GenerationRequest, ImagePayload, Prompt},
    ui::CancelToken,
    webhook::{classify, ReqwestTransport, WebhookTransport},
};

/// Sends one prompt to the webhook and interprets the reply.
pub struct RequestOrchestrator<T = ReqwestTransport> {
    transport: T,
    config: WebhookConfig,
}

impl RequestOrchestrator<ReqwestTransport> {
    pub fn with_reqwest(config: WebhookConfig) -> Result<Self> {
        Self::new(ReqwestTransport::new(), config)
    }
}

impl<T: WebhookTransport> RequestOrchestrator<T> {
    pub fn new(transport: T, config: WebhookConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { transport, config })
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Exactly one POST per call. Bounded by the configured timeout and by `cancel`.
    pub async fn request_image(&self, prompt: &Prompt, cancel: &CancelToken) -> Result<ImagePayload> {
        let body = serde_json::to_value(GenerationRequest::from(prompt))
            .map_err(|e| GenerationError::Transport(format!("could not encode request: {}", e)))?;

        log::info!("🖼️  Requesting image from {}", self.config.url);
        let timer = logger::timer("webhook round trip");

        let round_trip = self.transport.post_json(&self.config.url, &body);
        let response = tokio::select! {
            response = with_timeout(round_trip, self.config.timeout) => response?,
            _ = cancel.cancelled() => {
                log::warn!("⚠️  Image request cancelled after {}ms", timer.elapsed().as_millis());
                return Err(GenerationError::Cancelled);
            }
        };

        classify(response)
    }
}

async fn with_timeout<F, V>(future: F, timeout: Option<std::time::Duration>) -> Result<V>
where
    F: std::future::Future<Output = Result<V>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, future).await.map_err(|_| {
            log::error!("❌ Webhook did not answer within {}s", limit.as_secs());
            GenerationError::Timeout(limit)
        })?,
        None => future.await,
    }
}
