//! Clipboard integration
//!
//! The GUI library reads and writes the clipboard through a [`ClipboardBackend`]
//! owned by the bridge, so the storage always outlives the library context.

use std::fmt;

/// Clipboard the GUI library copies to and pastes from.
pub trait ClipboardBackend: Send + 'static {
    /// Current clipboard text, if any.
    fn get(&mut self) -> Option<String>;

    /// Replace the clipboard text.
    fn set(&mut self, text: &str);
}

/// In-process clipboard. Installed when the host supplies none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with some text on the clipboard.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
        }
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn get(&mut self) -> Option<String> {
        self.contents.clone()
    }

    fn set(&mut self, text: &str) {
        self.contents = Some(text.to_owned());
    }
}

impl fmt::Debug for dyn ClipboardBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClipboardBackend")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_round_trip() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.get(), None);

        clipboard.set("copied");
        assert_eq!(clipboard.get().as_deref(), Some("copied"));

        clipboard.set("");
        assert_eq!(clipboard.get().as_deref(), Some(""));
    }

    #[test]
    fn test_boxed_backend() {
        let mut clipboard: Box<dyn ClipboardBackend> = Box::new(MemoryClipboard::with_text("x"));
        assert_eq!(clipboard.get().as_deref(), Some("x"));
        clipboard.set("y");
        assert_eq!(clipboard.get().as_deref(), Some("y"));
    }
}
