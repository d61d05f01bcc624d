//! Clipboard access for "copy plan as text".
//!
//! Best effort: a missing display or clipboard daemon is reported back to the
//! caller, never fatal.

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Something text can be copied to
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard via arboard.
///
/// The handle is opened lazily and kept for the life of the process; on X11
/// the copied contents are served only while it is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let opened =
                arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(opened);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(ClipboardError::Unavailable("no clipboard handle".to_string()));
        };
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))?;
        debug!(bytes = text.len(), "copied text to clipboard");
        Ok(())
    }
}

/// Copy `text` and report the number of lines copied
pub fn copy_lines(clipboard: &mut dyn Clipboard, text: &str) -> Result<usize, ClipboardError> {
    clipboard.write_text(text)?;
    Ok(text.lines().count())
}
