//! Trigger-to-render behavior of a session against a scripted webhook.

use async_trait::async_trait;
use imagehook::{
    render::View, ErrorKind, GenerationError, Renderer, RequestOrchestrator, Session, StatusKind,
    UiState, WebhookConfig, WebhookResponse, WebhookTransport,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

enum Reply {
    Respond(WebhookResponse),
    Unreachable,
    Hang,
}

/// Answers the n-th call with the n-th reply; the last reply repeats.
struct Scripted {
    replies: Vec<Reply>,
    calls: AtomicUsize,
}

fn reply(status: u16, content_type: Option<&str>, body: &[u8]) -> Reply {
    Reply::Respond(WebhookResponse {
        status,
        content_type: content_type.map(String::from),
        body: body.to_vec(),
    })
}

impl Scripted {
    fn respond(status: u16, content_type: Option<&str>, body: &[u8]) -> Arc<Self> {
        Self::sequence(vec![reply(status, content_type, body)])
    }

    fn with(reply: Reply) -> Arc<Self> {
        Self::sequence(vec![reply])
    }

    fn sequence(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebhookTransport for Scripted {
    async fn post_json(
        &self,
        _url: &str,
        _body: &serde_json::Value,
    ) -> imagehook::Result<WebhookResponse> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.replies[n.min(self.replies.len() - 1)] {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Unreachable => Err(GenerationError::Transport("connection refused".into())),
            Reply::Hang => std::future::pending().await,
        }
    }
}

#[derive(Default)]
struct Recorder {
    frames: Vec<View>,
}

impl Renderer for Recorder {
    fn render(&mut self, state: &UiState) -> imagehook::Result<()> {
        self.frames.push(View::from(state));
        Ok(())
    }
}

fn session(transport: Arc<Scripted>) -> Session<Recorder, Arc<Scripted>> {
    session_with(transport, WebhookConfig::new())
}

fn session_with(transport: Arc<Scripted>, config: WebhookConfig) -> Session<Recorder, Arc<Scripted>> {
    let orchestrator = RequestOrchestrator::new(transport, config).unwrap();
    Session::new(orchestrator, Recorder::default())
}

fn assert_idle<R: Renderer>(session: &Session<R, Arc<Scripted>>) {
    let state = session.state();
    assert!(state.trigger_enabled());
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_blank_prompt_never_reaches_network() {
    for input in ["", "   ", "\n\t "] {
        let transport = Scripted::respond(200, Some("image/png"), b"png");
        let mut session = session(Arc::clone(&transport));

        let state = session.submit(input).await;
        let status = state.status().expect("error message shown");
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.cause, Some(ErrorKind::Validation));
        assert_eq!(state.attempt(), 0);

        assert_eq!(transport.calls(), 0);
        assert!(session.renderer().frames.iter().all(|f| !f.spinner_visible));
        assert_idle(&session);
    }
}

#[tokio::test]
async fn test_image_is_displayed() {
    let transport = Scripted::respond(200, Some("image/png"), b"\x89PNG\r\n");
    let mut session = session(Arc::clone(&transport));

    let state = session.submit("  a castle in the clouds ").await;

    let handle = state.image().handle().expect("image bound");
    assert!(state.image().is_visible());
    assert_eq!(handle.bytes(), b"\x89PNG\r\n");
    assert_eq!(handle.content_type(), "image/png");
    let status = state.status().unwrap();
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(status.text, "Image generated successfully!");

    assert_eq!(transport.calls(), 1);
    assert_idle(&session);

    let frames = &session.renderer().frames;
    assert_eq!(frames.len(), 2);
    assert!(frames[0].spinner_visible && !frames[0].trigger_enabled);
    assert!(frames[0].status.is_none() && !frames[0].image_visible);
    assert!(!frames[1].spinner_visible && frames[1].image_visible);
}

#[tokio::test]
async fn test_server_error() {
    let transport = Scripted::respond(500, Some("text/plain"), b"server exploded");
    let mut session = session(transport);

    let state = session.submit("anything").await;

    let status = state.status().unwrap();
    assert_eq!(status.cause, Some(ErrorKind::Server));
    assert!(status.text.contains("500"));
    assert!(status.text.contains("server exploded"));
    assert!(!state.image().is_visible());
    assert_idle(&session);
}

#[tokio::test]
async fn test_text_instead_of_image() {
    let transport = Scripted::respond(200, Some("text/plain"), b"Workflow was started");
    let mut session = session(transport);

    let state = session.submit("anything").await;

    let status = state.status().unwrap();
    assert_eq!(status.cause, Some(ErrorKind::ContractViolation));
    assert!(status.text.contains("text/plain"));
    assert!(!state.image().is_visible());
    assert!(state.image().handle().is_none());
    assert_eq!(session.images().live_count(), 0);
}

#[tokio::test]
async fn test_empty_image() {
    let transport = Scripted::respond(200, Some("image/png"), b"");
    let mut session = session(transport);

    let state = session.submit("anything").await;

    let status = state.status().unwrap();
    assert_eq!(status.cause, Some(ErrorKind::EmptyPayload));
    assert!(status.text.to_lowercase().contains("empty image"));
    assert!(!state.image().is_visible());
    assert_idle(&session);
}

#[tokio::test]
async fn test_transport_failure() {
    let mut session = session(Scripted::with(Reply::Unreachable));

    let state = session.submit("anything").await;

    let status = state.status().unwrap();
    assert_eq!(status.cause, Some(ErrorKind::Transport));
    assert!(status.text.contains("connection refused"));
    assert_idle(&session);
}

#[tokio::test]
async fn test_timeout_restores_ui() {
    let config = WebhookConfig::new().with_timeout(Duration::from_millis(50));
    let mut session = session_with(Scripted::with(Reply::Hang), config);

    let state = session.submit("slow one").await;

    assert_eq!(state.status().unwrap().cause, Some(ErrorKind::Timeout));
    assert_idle(&session);
}

#[tokio::test]
async fn test_cancel_in_flight() {
    let config = WebhookConfig::new().without_timeout();
    let mut session = session_with(Scripted::with(Reply::Hang), config);
    let cancel = session.cancel_handle();

    tokio::spawn(async move {
        for _ in 0..100 {
            if cancel.cancel() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    });

    let state = session.submit("changed my mind").await;

    assert_eq!(state.status().unwrap().cause, Some(ErrorKind::Cancelled));
    assert!(!session.cancel_handle().is_in_flight());
    assert_idle(&session);
}

#[tokio::test]
async fn test_abandoned_submit_leaves_trigger_enabled() {
    let config = WebhookConfig::new().without_timeout();
    let mut session = session_with(Scripted::with(Reply::Hang), config);

    let abandoned =
        tokio::time::timeout(Duration::from_millis(30), session.submit("walk away")).await;
    assert!(abandoned.is_err());

    assert_idle(&session);
    assert!(!session.cancel_handle().is_in_flight());
}

#[tokio::test]
async fn test_repeat_attempts_behave_identically() {
    let transport = Scripted::respond(200, Some("image/jpeg"), b"jpeg-bytes");
    let mut session = session(Arc::clone(&transport));

    let first_id = session.submit("same prompt").await.image().handle().unwrap().id();
    let second = session.submit("same prompt").await;
    let second_id = second.image().handle().unwrap().id();

    assert_ne!(first_id, second_id);
    assert_eq!(second.attempt(), 2);
    assert_eq!(second.status().unwrap().kind, StatusKind::Success);
    assert_eq!(transport.calls(), 2);

    assert_eq!(session.images().live_count(), 1);
    assert!(!session.images().is_live(&first_id));
    assert_idle(&session);
}

#[tokio::test]
async fn test_failure_after_success_releases_image() {
    let transport = Scripted::sequence(vec![
        reply(200, Some("image/png"), b"png"),
        reply(503, None, b"busy"),
    ]);
    let mut session = session(Arc::clone(&transport));

    let first_id = session.submit("first").await.image().handle().unwrap().id();
    assert_eq!(session.images().live_count(), 1);

    let state = session.submit("second").await;
    assert_eq!(state.status().unwrap().cause, Some(ErrorKind::Server));
    assert!(state.status().unwrap().text.contains("503"));
    assert!(!state.image().is_visible());
    assert!(state.image().handle().is_none());

    assert_eq!(transport.calls(), 2);
    assert_eq!(session.images().live_count(), 0);
    assert!(!session.images().is_live(&first_id));
    assert_idle(&session);
}

#[tokio::test]
async fn test_dropping_session_releases_image() {
    let mut session = session(Scripted::respond(200, Some("image/png"), b"png"));
    session.submit("keep me").await;
    let store = session.images().clone();
    assert_eq!(store.live_count(), 1);

    drop(session);
    assert_eq!(store.live_count(), 0);
}
