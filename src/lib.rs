//! Prompt-to-image front end for a workflow webhook.
//!
//! A [`Session`] reads a prompt, posts `{"promptText": ...}` to the configured
//! webhook, checks that an image came back, and drives the loading, status and
//! image state that a [`Renderer`] draws.

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod session;
pub mod ui;
pub mod webhook;

pub use config::WebhookConfig;
pub use error::{ErrorKind, GenerationError, Result};
pub use models::{GenerationRequest, ImagePayload, Prompt};
pub use orchestrator::RequestOrchestrator;
pub use render::{HtmlRenderer, Renderer, TerminalRenderer, View};
pub use session::Session;
pub use ui::{CancelHandle, CancelToken, ImageHandle, ImageStore, StatusKind, StatusMessage, UiState};
pub use webhook::{ReqwestTransport, WebhookResponse, WebhookTransport};
