use crate::{
    error::{GenerationError, Result},
    models::{ImagePayload, Prompt},
    orchestrator::RequestOrchestrator,
    render::Renderer,
    ui::{CancelHandle, ImageStore, StatusMessage, UiState},
    webhook::{ReqwestTransport, WebhookTransport},
};
use std::ops::{Deref, DerefMut};

pub const SUCCESS_MESSAGE: &str = "Image generated successfully!";

/// The page: one prompt input, one trigger, and the state it drives.
pub struct Session<R, T = ReqwestTransport> {
    orchestrator: RequestOrchestrator<T>,
    renderer: R,
    state: UiState,
    images: ImageStore,
    cancel: CancelHandle,
}

impl<R: Renderer, T: WebhookTransport> Session<R, T> {
    pub fn new(orchestrator: RequestOrchestrator<T>, renderer: R) -> Self {
        Self {
            orchestrator,
            renderer,
            state: UiState::new(),
            images: ImageStore::new(),
            cancel: CancelHandle::new(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Handle that cancels the attempt in flight, usable from other tasks.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Draw the current state without changing it.
    pub fn render(&mut self) {
        draw(&mut self.renderer, &self.state);
    }

    /// Trigger activation. Every outcome ends up in the returned state; nothing is propagated.
    pub async fn submit(&mut self, input: &str) -> &UiState {
        self.state.input = input.to_string();
        let prompt = match Prompt::parse(input) {
            Ok(prompt) => prompt,
            Err(err) => {
                log::warn!("⚠️  {}", err);
                self.state.show_status(StatusMessage::error(&err));
                draw(&mut self.renderer, &self.state);
                return &self.state;
            }
        };

        let Session {
            orchestrator,
            renderer,
            state,
            images,
            cancel,
        } = &mut *self;

        {
            let mut state = LoadingGuard::enter(state);
            let attempt = state.begin_attempt();
            log::info!("🔄 Attempt {}: generating image for '{}'", attempt, prompt);
            draw(renderer, &state);

            let in_flight = cancel.begin();
            let outcome = orchestrator.request_image(&prompt, in_flight.token()).await;
            drop(in_flight);

            apply(&mut state, images, attempt, outcome);
        }

        draw(renderer, state);
        &self.state
    }
}

fn apply(state: &mut UiState, images: &ImageStore, attempt: u64, outcome: Result<ImagePayload>) {
    match outcome {
        Ok(payload) => {
            log::info!(
                "✅ Attempt {}: received {} ({} bytes)",
                attempt,
                payload.content_type,
                payload.len()
            );
            state.image.clear();
            state.image.bind(images.create(payload));
            state.show_status(StatusMessage::success(SUCCESS_MESSAGE));
        }
        Err(err) => {
            log_failure(attempt, &err);
            state.show_status(StatusMessage::error(&err));
        }
    }
}

fn log_failure(attempt: u64, err: &GenerationError) {
    match err {
        GenerationError::Cancelled => log::warn!("⚠️  Attempt {}: {}", attempt, err),
        _ => log::error!("❌ Attempt {}: failed to generate image: {}", attempt, err),
    }
}

fn draw<R: Renderer>(renderer: &mut R, state: &UiState) {
    if let Err(e) = renderer.render(state) {
        log::error!("❌ {}", e);
    }
}

/// Keeps the trigger disabled while alive; dropping it always ends loading,
/// including when the `submit` future is abandoned mid-request.
struct LoadingGuard<'a> {
    state: &'a mut UiState,
}

impl<'a> LoadingGuard<'a> {
    fn enter(state: &'a mut UiState) -> Self {
        Self { state }
    }
}

impl Deref for LoadingGuard<'_> {
    type Target = UiState;

    fn deref(&self) -> &UiState {
        self.state
    }
}

impl DerefMut for LoadingGuard<'_> {
    fn deref_mut(&mut self) -> &mut UiState {
        self.state
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.end_loading();
    }
}
