//! System clipboard access.
//!
//! The terminal owns stdout, so the production clipboard writes an OSC 52
//! escape sequence and lets the terminal emulator place the text on the
//! system clipboard. Terminals without OSC 52 support silently ignore it;
//! only the write itself can fail here.

use std::io::{IsTerminal, Write, stdout};

use crossterm::{ExecutableCommand, clipboard::CopyToClipboard};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Destination for copied passwords.
pub trait Clipboard: Send {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// OSC 52 clipboard via crossterm.
#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut out = stdout();
        if !out.is_terminal() {
            return Err(ClipboardError::Unavailable("stdout is not a terminal".into()));
        }
        out.execute(CopyToClipboard::to_clipboard_from(text))?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::{Arc, Mutex};

    use super::{Clipboard, ClipboardError};

    /// Records every write; clones share the same log.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingClipboard {
        writes: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingClipboard {
        #[allow(clippy::unwrap_used)]
        pub fn writes(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl Clipboard for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.writes
                .lock()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?
                .push(text.to_owned());
            Ok(())
        }
    }

    /// Always refuses, like a terminal that denies clipboard access.
    #[derive(Debug, Default)]
    pub struct DeniedClipboard;

    impl Clipboard for DeniedClipboard {
        fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("permission denied".into()))
        }
    }
}
