use crate::error::{ErrorKind, GenerationError};
use crate::ui::resource::ImageHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    /// Which failure produced an error message.
    pub cause: Option<ErrorKind>,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
            cause: None,
        }
    }

    pub fn error(err: &GenerationError) -> Self {
        Self {
            text: err.user_message(),
            kind: StatusKind::Error,
            cause: Some(err.kind()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// Where the generated image is shown. Owns at most one handle.
#[derive(Debug, Default)]
pub struct ImageSlot {
    handle: Option<ImageHandle>,
    visible: bool,
}

impl ImageSlot {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn handle(&self) -> Option<&ImageHandle> {
        self.handle.as_ref()
    }

    /// Hide the slot and release whatever it was showing.
    pub fn clear(&mut self) {
        self.visible = false;
        self.handle = None;
    }

    /// Show `handle`, releasing the previous one.
    pub fn bind(&mut self, handle: ImageHandle) {
        self.handle = Some(handle);
        self.visible = true;
    }
}

/// Everything the page shows, independent of how it is drawn.
#[derive(Debug, Default)]
pub struct UiState {
    pub(crate) input: String,
    pub(crate) loading: bool,
    pub(crate) status: Option<StatusMessage>,
    pub(crate) status_seq: u64,
    pub(crate) image: ImageSlot,
    pub(crate) attempt: u64,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content of the prompt input, untrimmed.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.loading
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn image(&self) -> &ImageSlot {
        &self.image
    }

    /// Bumped every time a status message is shown, even if its text repeats.
    pub fn status_seq(&self) -> u64 {
        self.status_seq
    }

    /// Number of the most recent attempt that got past validation.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub(crate) fn show_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
        self.status_seq += 1;
    }

    /// Enter loading: trigger disabled, spinner shown, old status hidden, old image released.
    pub(crate) fn begin_attempt(&mut self) -> u64 {
        self.attempt += 1;
        self.loading = true;
        self.status = None;
        self.image.clear();
        self.attempt
    }

    pub(crate) fn end_loading(&mut self) {
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImagePayload;
    use crate::ui::ImageStore;

    #[test]
    fn test_begin_attempt_resets_page() {
        let store = ImageStore::new();
        let mut state = UiState::new();
        state.image.bind(store.create(ImagePayload {
            content_type: "image/png".into(),
            data: vec![1, 2, 3],
        }));
        state.show_status(StatusMessage::success("done"));

        let attempt = state.begin_attempt();

        assert_eq!(attempt, 1);
        assert!(state.is_loading());
        assert!(!state.trigger_enabled());
        assert!(state.status().is_none());
        assert!(!state.image().is_visible());
        assert!(state.image().handle().is_none());
        assert_eq!(store.live_count(), 0);

        state.end_loading();
        assert!(state.trigger_enabled());
    }

    #[test]
    fn test_error_status_keeps_cause() {
        let status = StatusMessage::error(&GenerationError::EmptyPayload);
        assert!(status.is_error());
        assert_eq!(status.cause, Some(ErrorKind::EmptyPayload));
        assert_eq!(status.kind.as_str(), "error");
    }
}
