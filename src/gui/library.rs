//! GUI library surface
//!
//! The bridge drives an immediate-mode GUI library through [`GuiLibrary`]. The
//! library owns widget state; the bridge feeds it input and draws its output.

use crate::core::texture::rgba8_len;
use crate::gui::clipboard::ClipboardBackend;
use crate::gui::draw::{DrawData, TextureId};
use crate::gui::error::{GuiError, Result};
use crate::gui::io::{IoSnapshot, KeyMap};
use std::path::Path;

/// RGBA32 font atlas bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontAtlasImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows.
    pub pixels: Vec<u8>,
}

impl FontAtlasImage {
    /// Wrap an atlas bitmap, checking the pixel count.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 || pixels.len() != rgba8_len(width, height) {
            return Err(GuiError::InvalidFontAtlas {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// An immediate-mode GUI library context.
///
/// One value is one context; nothing is shared between instances.
pub trait GuiLibrary {
    /// Frame handle user code builds widgets with.
    type Ui;

    /// Let the keyboard move focus between widgets.
    fn enable_keyboard_navigation(&mut self);

    /// Persist window layout to `path`, or nowhere.
    fn set_ini_filename(&mut self, _path: Option<&Path>) {}

    /// Route copy and paste through `backend`.
    fn set_clipboard(&mut self, backend: Box<dyn ClipboardBackend>);

    /// Rasterize the default font into an RGBA32 bitmap.
    fn build_font_atlas(&mut self) -> Result<FontAtlasImage>;

    /// Tell the library which texture id the uploaded atlas has.
    fn set_font_texture(&mut self, id: TextureId);

    /// Whether a text widget has focus.
    fn want_text_input(&self) -> bool;

    /// Commit `io` and begin a frame.
    fn new_frame(&mut self, io: &IoSnapshot, keys: &KeyMap) -> Result<&mut Self::Ui>;

    /// End the frame and hand over what it drew.
    fn render(&mut self) -> Result<DrawData>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! A scripted library for exercising the bridge without a real GUI.

    use super::*;

    /// Records what it was told and returns preset draw data.
    #[derive(Default)]
    pub struct ScriptedLibrary {
        pub keyboard_navigation: bool,
        pub clipboard: Option<Box<dyn ClipboardBackend>>,
        pub font_texture: Option<TextureId>,
        pub want_text_input: bool,
        pub frames: Vec<IoSnapshot>,
        pub in_frame: bool,
        pub next_draw: DrawData,
        pub ui: ScriptedUi,
    }

    /// Widgets push draw lists here during a frame.
    #[derive(Debug, Default)]
    pub struct ScriptedUi {
        pub lists: Vec<crate::gui::draw::DrawList>,
    }

    impl GuiLibrary for ScriptedLibrary {
        type Ui = ScriptedUi;

        fn enable_keyboard_navigation(&mut self) {
            self.keyboard_navigation = true;
        }

        fn set_clipboard(&mut self, backend: Box<dyn ClipboardBackend>) {
            self.clipboard = Some(backend);
        }

        fn build_font_atlas(&mut self) -> Result<FontAtlasImage> {
            FontAtlasImage::new(2, 2, vec![255; 16])
        }

        fn set_font_texture(&mut self, id: TextureId) {
            self.font_texture = Some(id);
        }

        fn want_text_input(&self) -> bool {
            self.want_text_input
        }

        fn new_frame(&mut self, io: &IoSnapshot, _keys: &KeyMap) -> Result<&mut ScriptedUi> {
            self.frames.push(io.clone());
            self.in_frame = true;
            self.ui.lists.clear();
            Ok(&mut self.ui)
        }

        fn render(&mut self) -> Result<DrawData> {
            self.in_frame = false;
            let mut data = std::mem::take(&mut self.next_draw);
            data.lists.append(&mut self.ui.lists);
            if let Some(io) = self.frames.last() {
                data.display_size = io.display_size;
            }
            Ok(data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_atlas_validates_size() {
        assert!(FontAtlasImage::new(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            FontAtlasImage::new(2, 2, vec![0; 15]),
            Err(GuiError::InvalidFontAtlas { len: 15, .. })
        ));
        assert!(FontAtlasImage::new(0, 0, Vec::new()).is_err());
    }
}
