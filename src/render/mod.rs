pub mod html;
pub mod terminal;

use crate::{
    error::Result,
    ui::{StatusKind, UiState},
};

pub use html::HtmlRenderer;
pub use terminal::TerminalRenderer;

/// What each page element should look like for a given [`UiState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub trigger_enabled: bool,
    pub spinner_visible: bool,
    pub status: Option<(String, StatusKind)>,
    pub status_seq: u64,
    pub image_visible: bool,
    pub image_url: Option<String>,
}

impl From<&UiState> for View {
    fn from(state: &UiState) -> Self {
        let image = state.image();
        View {
            trigger_enabled: state.trigger_enabled(),
            spinner_visible: state.is_loading(),
            status: state.status().map(|s| (s.text.clone(), s.kind)),
            status_seq: state.status_seq(),
            image_visible: image.is_visible(),
            image_url: image.handle().map(|h| h.url().to_string()),
        }
    }
}

/// Draws a [`UiState`]. The only place side effects happen.
pub trait Renderer {
    fn render(&mut self, state: &UiState) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, state: &UiState) -> Result<()> {
        (**self).render(state)
    }
}

/// Renders to every inner renderer, stopping at the first failure.
pub struct Fanout(pub Vec<Box<dyn Renderer + Send>>);

impl Renderer for Fanout {
    fn render(&mut self, state: &UiState) -> Result<()> {
        for renderer in self.0.iter_mut() {
            renderer.render(state)?;
        }
        Ok(())
    }
}
