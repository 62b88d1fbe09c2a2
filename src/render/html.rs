use crate::{
    error::{GenerationError, Result},
    render::{Renderer, View},
    ui::UiState,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::PathBuf;

/// Renders the page as a self-contained HTML document, images inlined as `data:` URIs.
#[derive(Default)]
pub struct HtmlRenderer {
    path: Option<PathBuf>,
    snapshot: String,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also write each snapshot to `path`.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn snapshot(&self) -> &str {
        &self.snapshot
    }
}

fn hidden(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        " hidden"
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

pub fn page(state: &UiState) -> String {
    let view = View::from(state);

    let status = match &view.status {
        Some((text, kind)) => format!(
            r#"<p id="statusMessage" class="status-message {}">{}</p>"#,
            kind.as_str(),
            escape(text)
        ),
        None => r#"<p id="statusMessage" class="status-message hidden"></p>"#.to_string(),
    };

    let src = state
        .image()
        .handle()
        .filter(|_| view.image_visible)
        .map(|handle| {
            format!(
                "data:{};base64,{}",
                escape(handle.content_type()),
                STANDARD.encode(handle.bytes())
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Image Generator</title></head>
<body>
<main class="container">
<input id="promptInput" type="text" value="{prompt}" placeholder="Describe the image you want">
<button id="generateBtn"{disabled}>Generate Image</button>
<div id="loadingIndicator" class="loader{spinner}"></div>
{status}
<img id="generatedImage" class="{image}" src="{src}" alt="Generated image">
</main>
</body>
</html>
"#,
        prompt = escape(state.input()),
        disabled = if view.trigger_enabled { "" } else { " disabled" },
        spinner = hidden(view.spinner_visible),
        status = status,
        image = hidden(view.image_visible).trim_start(),
        src = src,
    )
}

impl Renderer for HtmlRenderer {
    fn render(&mut self, state: &UiState) -> Result<()> {
        self.snapshot = page(state);

        if let Some(path) = &self.path {
            std::fs::write(path, &self.snapshot).map_err(|e| {
                GenerationError::Render(format!("could not write {}: {}", path.display(), e))
            })?;
            log::debug!("Wrote page snapshot to {}", path.display());
        }
        Ok(())
    }
}
