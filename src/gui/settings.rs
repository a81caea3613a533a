//! GUI bridge settings
//!
//! Configuration for bridge creation.

use crate::gui::clipboard::ClipboardBackend;
use std::path::PathBuf;

/// Settings for creating a GUI bridge.
#[derive(Debug)]
pub struct GuiSettings {
    /// Vertices the vertex buffer holds before its first reallocation.
    pub initial_vertices: u64,
    /// Indices the index buffer holds before its first reallocation.
    pub initial_indices: u64,
    /// Whether the keyboard can move focus between widgets.
    pub keyboard_navigation: bool,
    /// Where the GUI library persists window layout, if anywhere.
    pub ini_filename: Option<PathBuf>,
    /// Clipboard to install instead of the in-process one.
    pub clipboard: Option<Box<dyn ClipboardBackend>>,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            initial_vertices: 128,
            initial_indices: 128,
            keyboard_navigation: true,
            ini_filename: None,
            clipboard: None,
        }
    }
}

impl GuiSettings {
    /// Create new GUI settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial vertex buffer capacity, in vertices.
    pub fn initial_vertices(mut self, count: u64) -> Self {
        self.initial_vertices = count;
        self
    }

    /// Set the initial index buffer capacity, in indices.
    pub fn initial_indices(mut self, count: u64) -> Self {
        self.initial_indices = count;
        self
    }

    /// Set whether keyboard navigation is enabled.
    pub fn keyboard_navigation(mut self, enabled: bool) -> Self {
        self.keyboard_navigation = enabled;
        self
    }

    /// Persist window layout to `path`.
    pub fn ini_filename(mut self, path: impl Into<PathBuf>) -> Self {
        self.ini_filename = Some(path.into());
        self
    }

    /// Use `clipboard` for copy and paste.
    pub fn clipboard(mut self, clipboard: impl ClipboardBackend) -> Self {
        self.clipboard = Some(Box::new(clipboard));
        self
    }
}
