//! Best-effort clipboard access.
//!
//! Copying an identifier is a convenience, not a guarantee: failures are
//! logged by the caller and never surfaced to the user. The trait seam keeps
//! the engine testable without a system clipboard.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// A destination for copied text.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by arboard. Construction fails in headless
/// environments; callers degrade to a no-op sink.
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")
    }
}

/// Sink that drops everything; used when no system clipboard is available.
#[derive(Debug, Default)]
pub struct NoopClipboard;

impl ClipboardSink for NoopClipboard {
    fn set_text(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}
