//! Dear ImGui adapter
//!
//! [`ImguiLibrary`] drives an `imgui::Context` through [`GuiLibrary`]. The
//! context is only made current for the duration of a call or a frame, so
//! several libraries can coexist as long as their frames don't overlap.

use crate::gui::clipboard::ClipboardBackend;
use crate::gui::draw::{DrawCmd, DrawData, DrawList, DrawVert, TextureId};
use crate::gui::error::{GuiError, Result};
use crate::gui::io::{GuiKey, IoSnapshot, KeyMap};
use crate::gui::library::{FontAtlasImage, GuiLibrary};
use std::path::Path;

enum Slot {
    Active(imgui::Context),
    Suspended(imgui::SuspendedContext),
}

/// A Dear ImGui context.
pub struct ImguiLibrary {
    slot: Option<Slot>,
    want_text_input: bool,
    in_frame: bool,
}

impl ImguiLibrary {
    /// Create a context with the default font and no ini file.
    pub fn new() -> Result<Self> {
        let mut library = Self {
            slot: Some(Slot::Suspended(imgui::SuspendedContext::create())),
            want_text_input: false,
            in_frame: false,
        };
        library
            .configure(|ctx| {
                ctx.set_ini_filename(None::<std::path::PathBuf>);
                ctx.fonts().add_font(&[imgui::FontSource::DefaultFontData { config: None }]);
            })
            .map_err(|_| GuiError::ContextCreation("another imgui context is active".into()))?;
        Ok(library)
    }

    /// Run `f` on the context, e.g. to change the style.
    pub fn configure<R>(&mut self, f: impl FnOnce(&mut imgui::Context) -> R) -> Result<R> {
        let result = f(activate(&mut self.slot)?);
        if !self.in_frame {
            suspend(&mut self.slot);
        }
        Ok(result)
    }
}

impl GuiLibrary for ImguiLibrary {
    type Ui = imgui::Ui;

    fn enable_keyboard_navigation(&mut self) {
        let configured = self.configure(|ctx| {
            ctx.io_mut()
                .config_flags
                .insert(imgui::ConfigFlags::NAV_ENABLE_KEYBOARD);
        });
        if let Err(e) = configured {
            tracing::warn!("keyboard navigation not enabled: {}", e);
        }
    }

    fn set_ini_filename(&mut self, path: Option<&Path>) {
        if let Err(e) = self.configure(|ctx| ctx.set_ini_filename(path.map(Path::to_path_buf))) {
            tracing::warn!("ini file not set: {}", e);
        }
    }

    fn set_clipboard(&mut self, backend: Box<dyn ClipboardBackend>) {
        let configured = self.configure(|ctx| ctx.set_clipboard_backend(Clipboard(backend)));
        if let Err(e) = configured {
            tracing::warn!("clipboard not installed: {}", e);
        }
    }

    fn build_font_atlas(&mut self) -> Result<FontAtlasImage> {
        self.configure(|ctx| {
            let texture = ctx.fonts().build_rgba32_texture();
            FontAtlasImage::new(texture.width, texture.height, texture.data.to_vec())
        })?
    }

    fn set_font_texture(&mut self, id: TextureId) {
        let configured = self.configure(|ctx| {
            ctx.fonts().tex_id = imgui::TextureId::new(id.0 as usize);
        });
        if let Err(e) = configured {
            tracing::warn!("font texture id not set: {}", e);
        }
    }

    fn want_text_input(&self) -> bool {
        self.want_text_input
    }

    fn new_frame(&mut self, io: &IoSnapshot, keys: &KeyMap) -> Result<&mut imgui::Ui> {
        let ctx = activate(&mut self.slot)?;
        forward_input(ctx.io_mut(), io, keys);
        self.in_frame = true;
        Ok(ctx.new_frame())
    }

    fn render(&mut self) -> Result<DrawData> {
        if !self.in_frame {
            return Err(GuiError::NoFrame);
        }
        let ctx = activate(&mut self.slot)?;
        let data = convert_draw_data(ctx.render());
        self.want_text_input = ctx.io().want_text_input;
        self.in_frame = false;
        suspend(&mut self.slot);
        Ok(data)
    }
}

fn activate(slot: &mut Option<Slot>) -> Result<&mut imgui::Context> {
    let activated = match slot.take() {
        Some(Slot::Active(ctx)) => Slot::Active(ctx),
        Some(Slot::Suspended(suspended)) => match suspended.activate() {
            Ok(ctx) => Slot::Active(ctx),
            Err(suspended) => {
                *slot = Some(Slot::Suspended(suspended));
                return Err(GuiError::ContextBusy);
            }
        },
        None => return Err(GuiError::ContextBusy),
    };

    match slot.insert(activated) {
        Slot::Active(ctx) => Ok(ctx),
        Slot::Suspended(_) => Err(GuiError::ContextBusy),
    }
}

fn suspend(slot: &mut Option<Slot>) {
    if let Some(Slot::Active(ctx)) = slot.take() {
        *slot = Some(Slot::Suspended(ctx.suspend()));
    }
}

/// Queue the snapshot as input events. Dear ImGui drops events that don't
/// change state, so everything is sent every frame.
fn forward_input(gui_io: &mut imgui::Io, io: &IoSnapshot, keys: &KeyMap) {
    gui_io.display_size = io.display_size;
    gui_io.display_framebuffer_scale = io.framebuffer_scale;
    gui_io.delta_time = io.delta_time.max(f32::EPSILON);

    gui_io.add_key_event(imgui::Key::ModCtrl, io.modifiers.ctrl);
    gui_io.add_key_event(imgui::Key::ModShift, io.modifiers.shift);
    gui_io.add_key_event(imgui::Key::ModAlt, io.modifiers.alt);
    gui_io.add_key_event(imgui::Key::ModSuper, io.modifiers.super_key);
    for (gui, host) in keys.iter() {
        gui_io.add_key_event(imgui_key(gui), io.is_key_down(host));
    }

    gui_io.add_mouse_pos_event(io.mouse_pos);
    let buttons = [
        imgui::MouseButton::Left,
        imgui::MouseButton::Right,
        imgui::MouseButton::Middle,
    ];
    for (button, down) in buttons.into_iter().zip(io.mouse_down) {
        gui_io.add_mouse_button_event(button, down);
    }
    if io.mouse_wheel != [0.0, 0.0] {
        gui_io.add_mouse_wheel_event(io.mouse_wheel);
    }

    for &c in &io.input_characters {
        gui_io.add_input_character(c);
    }
}

fn imgui_key(key: GuiKey) -> imgui::Key {
    match key {
        GuiKey::Tab => imgui::Key::Tab,
        GuiKey::LeftArrow => imgui::Key::LeftArrow,
        GuiKey::RightArrow => imgui::Key::RightArrow,
        GuiKey::UpArrow => imgui::Key::UpArrow,
        GuiKey::DownArrow => imgui::Key::DownArrow,
        GuiKey::PageUp => imgui::Key::PageUp,
        GuiKey::PageDown => imgui::Key::PageDown,
        GuiKey::Home => imgui::Key::Home,
        GuiKey::End => imgui::Key::End,
        GuiKey::Delete => imgui::Key::Delete,
        GuiKey::Backspace => imgui::Key::Backspace,
        GuiKey::Enter => imgui::Key::Enter,
        GuiKey::Escape => imgui::Key::Escape,
        GuiKey::Space => imgui::Key::Space,
        GuiKey::A => imgui::Key::A,
        GuiKey::C => imgui::Key::C,
        GuiKey::V => imgui::Key::V,
        GuiKey::X => imgui::Key::X,
        GuiKey::Y => imgui::Key::Y,
        GuiKey::Z => imgui::Key::Z,
    }
}

fn convert_draw_data(draw_data: &imgui::DrawData) -> DrawData {
    let lists = draw_data
        .draw_lists()
        .map(|list| {
            let vertices = list
                .vtx_buffer()
                .iter()
                .map(|v| DrawVert::new(v.pos, v.uv, v.col))
                .collect();
            let commands = list
                .commands()
                .filter_map(|cmd| match cmd {
                    imgui::DrawCmd::Elements { count, cmd_params } => Some(DrawCmd {
                        elem_count: count as u32,
                        clip_rect: cmd_params.clip_rect,
                        texture: Some(TextureId(cmd_params.texture_id.id() as u64)),
                    }),
                    // No backend state or user callbacks to honor.
                    imgui::DrawCmd::ResetRenderState | imgui::DrawCmd::RawCallback { .. } => None,
                })
                .collect();
            DrawList::new(vertices, list.idx_buffer().to_vec(), commands)
        })
        .collect();

    DrawData {
        display_pos: draw_data.display_pos,
        display_size: draw_data.display_size,
        lists,
    }
}

struct Clipboard(Box<dyn ClipboardBackend>);

impl imgui::ClipboardBackend for Clipboard {
    fn get(&mut self) -> Option<String> {
        self.0.get()
    }

    fn set(&mut self, value: &str) {
        self.0.set(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::clipboard::MemoryClipboard;
    use crate::input::Key;

    #[test]
    fn test_imgui_frame_produces_draw_data() {
        let mut library = ImguiLibrary::new().unwrap();
        library.enable_keyboard_navigation();
        library.set_clipboard(Box::new(MemoryClipboard::new()));

        let atlas = library.build_font_atlas().unwrap();
        assert_eq!(atlas.pixels.len(), (atlas.width * atlas.height * 4) as usize);
        library.set_font_texture(TextureId::FONT);

        assert!(matches!(library.render(), Err(GuiError::NoFrame)));

        let keys = KeyMap::default();
        let io = IoSnapshot {
            display_size: [800.0, 600.0],
            delta_time: 1.0 / 60.0,
            keys_down: [Key::Tab].into_iter().collect(),
            ..Default::default()
        };
        let ui = library.new_frame(&io, &keys).unwrap();
        ui.window("test").build(|| {
            ui.text("hello");
        });
        let data = library.render().unwrap();

        assert_eq!(data.display_size, [800.0, 600.0]);
        assert!(data.total_vtx_count() > 0);
        assert!(data
            .lists
            .iter()
            .flat_map(|list| &list.commands)
            .all(|cmd| cmd.texture == Some(TextureId::FONT)));
    }

    #[test]
    fn test_every_gui_key_maps_to_a_distinct_imgui_key() {
        let mapped: std::collections::HashSet<_> =
            GuiKey::ALL.iter().map(|&key| imgui_key(key) as i32).collect();
        assert_eq!(mapped.len(), GuiKey::ALL.len());
    }
}
