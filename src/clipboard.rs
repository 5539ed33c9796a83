//! Clipboard access
//!
//! The system clipboard is opened once, at the start of the command that
//! needs it, and handed down as a [`ClipboardSink`].

use tracing::debug;

use crate::error::Result;

/// Something text can be copied to
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// The OS clipboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    /// Open the system clipboard
    pub fn open() -> Result<Self> {
        let inner = arboard::Clipboard::new()?;
        debug!("Clipboard opened");
        Ok(Self { inner })
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.inner.set_text(text.to_string())?;
        debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}
