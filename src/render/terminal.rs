use crate::{
    error::{GenerationError, Result},
    render::{Renderer, View},
    ui::{ImageHandle, StatusKind, UiState},
};
use colored::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Line-oriented renderer: spinner and status lines on a writer, images saved to disk.
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    output: Option<PathBuf>,
    show_colors: bool,
    last_saved: Option<Uuid>,
    last_view: Option<View>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            output: None,
            show_colors: true,
            last_saved: None,
            last_view: None,
        }
    }

    /// Where a visible image is written. An extension is added from the content type if missing.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.show_colors {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn save(&mut self, handle: &ImageHandle) -> Result<Option<PathBuf>> {
        let Some(base) = self.output.as_ref() else {
            return Ok(None);
        };
        let path = output_path(base, handle.extension());
        std::fs::write(&path, handle.bytes()).map_err(|e| {
            GenerationError::Render(format!("could not write {}: {}", path.display(), e))
        })?;
        log::info!("💾 Saved image to {} ({} bytes)", path.display(), handle.bytes().len());
        Ok(Some(path))
    }
}

fn output_path(base: &Path, extension: &str) -> PathBuf {
    if base.extension().is_some() {
        base.to_path_buf()
    } else {
        base.with_extension(extension)
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, state: &UiState) -> Result<()> {
        let view = View::from(state);
        if self.last_view.as_ref() == Some(&view) {
            return Ok(());
        }

        let mut lines = Vec::new();

        if view.spinner_visible {
            lines.push(self.paint("⏳ Generating image...", Color::Cyan));
        }

        if let Some((text, kind)) = &view.status {
            let line = match kind {
                StatusKind::Success => self.paint(&format!("✅ {}", text), Color::Green),
                StatusKind::Error => self.paint(&format!("❌ {}", text), Color::Red),
            };
            lines.push(line);
        }

        if let Some(handle) = state.image().handle().filter(|_| view.image_visible) {
            if self.last_saved != Some(handle.id()) {
                self.last_saved = Some(handle.id());
                let line = match self.save(handle) {
                    Ok(saved) => {
                        let location = saved
                            .map(|path| path.display().to_string())
                            .unwrap_or_else(|| handle.url().to_string());
                        format!(
                            "🖼️  {} ({}, {} bytes)",
                            location,
                            handle.content_type(),
                            handle.bytes().len()
                        )
                    }
                    Err(e) => {
                        log::error!("❌ {}", e);
                        self.paint(&format!("❌ {}", e), Color::Red)
                    }
                };
                lines.push(line);
            }
        }

        for line in lines {
            writeln!(self.out, "{}", line)
                .map_err(|e| GenerationError::Render(format!("terminal write failed: {}", e)))?;
        }
        self.out
            .flush()
            .map_err(|e| GenerationError::Render(format!("terminal flush failed: {}", e)))?;

        self.last_view = Some(view);
        Ok(())
    }
}
