use crate::error::{GenerationError, Result};
use std::env;
use std::time::Duration;

/// Endpoint used when nothing else is configured: an n8n workflow's webhook node.
pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:5678/webhook/generate-image";

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Longest server-error body excerpt shown to the user, in characters.
pub const ERROR_EXCERPT_CHARS: usize = 200;

/// Longest unexpected-body excerpt written to the log, in characters.
pub const DIAGNOSTIC_EXCERPT_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    pub timeout: Option<Duration>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        WebhookConfig {
            url: DEFAULT_WEBHOOK_URL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl WebhookConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `IMAGEHOOK_WEBHOOK_URL` and `IMAGEHOOK_TIMEOUT_SECS`.
    /// A timeout of `0` disables it.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("IMAGEHOOK_WEBHOOK_URL") {
            config.url = url;
        }

        if let Ok(raw) = env::var("IMAGEHOOK_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                GenerationError::Config(format!("IMAGEHOOK_TIMEOUT_SECS is not a number: {}", raw))
            })?;
            config = config.with_timeout_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = if secs == 0 {
            None
        } else {
            Some(Duration::from_secs(secs))
        };
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.url)
            .map_err(|e| GenerationError::Config(format!("invalid webhook URL '{}': {}", self.url, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(GenerationError::Config(format!(
                "webhook URL must be http or https, got '{}'",
                other
            ))),
        }
    }
}
