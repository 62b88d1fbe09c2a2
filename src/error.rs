use std::time::Duration;
use thiserror::Error;

/// Prefix shared by every failure that happened after the request was attempted.
const FAILURE_PREFIX: &str = "Failed to generate image";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Please enter a description for the image.")]
    Validation,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Webhook workflow error (Status: {status}): {excerpt}")]
    Server { status: u16, excerpt: String },

    #[error("Expected image from webhook, but received '{}'. Check the workflow logs and its webhook response.", content_type_label(.content_type))]
    ContractViolation { content_type: Option<String> },

    #[error("Received an empty image. Generation might have failed on the AI side or in the webhook workflow.")]
    EmptyPayload,

    #[error("Request timed out after {}s", whole_secs(.0))]
    Timeout(Duration),

    #[error("Request was cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),
}

/// Fieldless discriminant of [`GenerationError`], handy for matching on outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    Server,
    ContractViolation,
    EmptyPayload,
    Timeout,
    Cancelled,
    Config,
    Render,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::Validation => ErrorKind::Validation,
            GenerationError::Transport(_) => ErrorKind::Transport,
            GenerationError::Server { .. } => ErrorKind::Server,
            GenerationError::ContractViolation { .. } => ErrorKind::ContractViolation,
            GenerationError::EmptyPayload => ErrorKind::EmptyPayload,
            GenerationError::Timeout(_) => ErrorKind::Timeout,
            GenerationError::Cancelled => ErrorKind::Cancelled,
            GenerationError::Config(_) => ErrorKind::Config,
            GenerationError::Render(_) => ErrorKind::Render,
        }
    }

    /// Text shown in the status region for this failure.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Validation | GenerationError::EmptyPayload => self.to_string(),
            other => format!("{}: {}", FAILURE_PREFIX, other),
        }
    }
}

fn content_type_label(content_type: &Option<String>) -> &str {
    content_type.as_deref().unwrap_or("none")
}

fn whole_secs(duration: &Duration) -> u64 {
    duration.as_secs()
}

pub type Result<T> = std::result::Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_carries_status_and_excerpt() {
        let err = GenerationError::Server {
            status: 500,
            excerpt: "server exploded".into(),
        };
        let msg = err.user_message();
        assert!(msg.starts_with("Failed to generate image: "));
        assert!(msg.contains("500"));
        assert!(msg.contains("server exploded"));
        assert_eq!(err.kind(), ErrorKind::Server);
    }

    #[test]
    fn test_contract_violation_without_content_type() {
        let err = GenerationError::ContractViolation { content_type: None };
        assert!(err.to_string().contains("'none'"));

        let err = GenerationError::ContractViolation {
            content_type: Some("text/plain".into()),
        };
        assert!(err.to_string().contains("'text/plain'"));
    }

    #[test]
    fn test_local_messages_have_no_prefix() {
        assert_eq!(
            GenerationError::Validation.user_message(),
            "Please enter a description for the image."
        );
        assert!(GenerationError::EmptyPayload
            .user_message()
            .starts_with("Received an empty image"));
        assert_eq!(
            GenerationError::Timeout(Duration::from_secs(30)).user_message(),
            "Failed to generate image: Request timed out after 30s"
        );
    }
}
