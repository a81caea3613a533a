//! GUI bridge
//!
//! Runs a [`GuiLibrary`] once per frame: [`GuiBridge::update`] feeds it input
//! and starts a frame, [`GuiBridge::draw`] ends the frame and draws it over
//! whatever the host rendered.

use crate::context::WgpuContext;
use crate::core::render_states::ClearState;
use crate::core::render_target::RenderTarget;
use crate::effect::EffectLibrary;
use crate::gui::clipboard::MemoryClipboard;
use crate::gui::draw::{DrawData, TextureId};
use crate::gui::error::Result;
use crate::gui::io::{IoSnapshot, IoTranslator, KeyMap};
use crate::gui::library::GuiLibrary;
use crate::gui::renderer::GuiRenderer;
use crate::gui::settings::GuiSettings;
use crate::input::InputSource;

/// Counters of one drawn frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: u32,
    /// Commands clipped away entirely.
    pub skipped: u32,
    pub vertices: u32,
    pub indices: u32,
    pub vertex_buffer_grown: bool,
    pub index_buffer_grown: bool,
}

/// The CPU half of the bridge: library, key map and input translation.
pub struct GuiFrontend<L: GuiLibrary> {
    library: L,
    translator: IoTranslator,
    key_map: KeyMap,
    io: IoSnapshot,
    in_frame: bool,
}

impl<L: GuiLibrary> GuiFrontend<L> {
    /// Configure input on a freshly created library context.
    ///
    /// Takes the clipboard out of `settings`; the in-process clipboard is
    /// installed when there is none.
    pub fn new(mut library: L, settings: &mut GuiSettings) -> Self {
        if settings.keyboard_navigation {
            library.enable_keyboard_navigation();
        }
        library.set_ini_filename(settings.ini_filename.as_deref());
        let clipboard = settings
            .clipboard
            .take()
            .unwrap_or_else(|| Box::new(MemoryClipboard::new()));
        library.set_clipboard(clipboard);

        Self {
            library,
            translator: IoTranslator::new(),
            key_map: KeyMap::default(),
            io: IoSnapshot::default(),
            in_frame: false,
        }
    }

    /// Translate input and start a library frame.
    ///
    /// A frame that was started but never drawn is ended and discarded first.
    pub fn begin_frame(
        &mut self,
        input: &mut impl InputSource,
        delta_time: f32,
    ) -> Result<&mut L::Ui> {
        if self.in_frame {
            tracing::trace!("discarding undrawn gui frame");
            self.library.render()?;
            self.in_frame = false;
        }

        let want_text_input = self.library.want_text_input();
        self.io = self
            .translator
            .translate(input, delta_time, want_text_input);
        let ui = self.library.new_frame(&self.io, &self.key_map)?;
        self.in_frame = true;
        Ok(ui)
    }

    /// End the current frame. `None` if no frame was started.
    pub fn end_frame(&mut self) -> Result<Option<DrawData>> {
        if !self.in_frame {
            return Ok(None);
        }
        self.in_frame = false;
        self.library.render().map(Some)
    }

    /// Whether a frame was started and not yet ended.
    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    /// Input state committed by the last [`begin_frame`](Self::begin_frame).
    pub fn io(&self) -> &IoSnapshot {
        &self.io
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut L {
        &mut self.library
    }
}

/// A GUI library wired into the frame: input in, overlay out.
pub struct GuiBridge<L: GuiLibrary> {
    frontend: GuiFrontend<L>,
    renderer: GuiRenderer,
}

impl<L: GuiLibrary> GuiBridge<L> {
    /// Initialize the bridge for targets of `format`.
    ///
    /// `library` is a created context. Input is configured first, then the
    /// pipeline and buffers are built, then the font atlas is uploaded.
    pub fn new(
        ctx: &WgpuContext,
        effects: &mut EffectLibrary,
        format: wgpu::TextureFormat,
        library: L,
        mut settings: GuiSettings,
    ) -> Result<Self> {
        let mut frontend = GuiFrontend::new(library, &mut settings);
        let font = frontend.library.build_font_atlas()?;
        let renderer = GuiRenderer::new(ctx, effects, format, &font, &settings)?;
        frontend.library.set_font_texture(TextureId::FONT);

        Ok(Self { frontend, renderer })
    }

    /// Feed this frame's input to the library and start its frame.
    ///
    /// Call once per frame, before the host updates its scene. Widgets are
    /// built on the returned handle until [`draw`](Self::draw).
    pub fn update(&mut self, input: &mut impl InputSource, delta_time: f32) -> Result<&mut L::Ui> {
        self.frontend.begin_frame(input, delta_time)
    }

    /// End the frame and draw it over `target` in its own submission.
    ///
    /// Call after the host's scene is submitted and before presenting.
    pub fn draw(&mut self, ctx: &WgpuContext, target: &RenderTarget<'_>) -> Result<FrameStats> {
        let mut encoder = ctx.create_encoder(Some("gui encoder"));
        let stats = self.record(ctx, &mut encoder, target)?;
        ctx.submit(Some(encoder.finish()));
        Ok(stats)
    }

    /// End the frame and record its draws into the host's `encoder`.
    ///
    /// The pass loads the target, so anything recorded earlier stays underneath.
    pub fn record(
        &mut self,
        ctx: &WgpuContext,
        encoder: &mut wgpu::CommandEncoder,
        target: &RenderTarget<'_>,
    ) -> Result<FrameStats> {
        self.renderer.check_format(target.format())?;
        let Some(data) = self.frontend.end_frame()? else {
            return Ok(FrameStats::default());
        };

        let prepared = self.renderer.prepare(ctx, &data);
        let replayed = {
            let mut pass = target.begin_render_pass(encoder, ClearState::load(), "gui pass");
            self.renderer.render(&mut pass, &data, target.size())
        };

        let stats = FrameStats {
            draw_calls: replayed.draw_calls,
            skipped: replayed.skipped,
            vertices: replayed.vertex_offset,
            indices: replayed.index_offset,
            vertex_buffer_grown: prepared.vertex_buffer_grown,
            index_buffer_grown: prepared.index_buffer_grown,
        };
        tracing::trace!(
            "gui frame: {} draws, {} vertices, {} indices",
            stats.draw_calls,
            stats.vertices,
            stats.indices
        );
        Ok(stats)
    }

    /// Make `view` drawable from GUI code.
    pub fn register_texture(&mut self, ctx: &WgpuContext, view: &wgpu::TextureView) -> TextureId {
        self.renderer.register_texture(ctx, view)
    }

    /// Forget a registered texture. Returns whether it was registered.
    pub fn unregister_texture(&mut self, id: TextureId) -> bool {
        self.renderer.unregister_texture(id)
    }

    /// Format every draw target must have.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.renderer.format()
    }

    pub fn io(&self) -> &IoSnapshot {
        self.frontend.io()
    }

    pub fn key_map(&self) -> &KeyMap {
        self.frontend.key_map()
    }

    pub fn library(&self) -> &L {
        self.frontend.library()
    }

    pub fn library_mut(&mut self) -> &mut L {
        self.frontend.library_mut()
    }

    pub fn renderer(&self) -> &GuiRenderer {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::BufferCapacity;
    use crate::gui::draw::{DrawCmd, DrawList, DrawVert};
    use crate::gui::library::testing::ScriptedLibrary;
    use crate::gui::replay::{replay, DrawCommandSink, ScissorRect, TextureBinding};
    use crate::gui::staging::FrameStaging;
    use crate::input::{InputEvent, InputState, MouseButton};
    use std::ops::Range;

    #[derive(Default)]
    struct CountingSink {
        draws: Vec<(Range<u32>, i32)>,
        scissors: Vec<ScissorRect>,
    }

    impl DrawCommandSink for CountingSink {
        fn set_scissor_rect(&mut self, rect: ScissorRect) {
            self.scissors.push(rect);
        }

        fn bind_texture(&mut self, _texture: TextureBinding) {}

        fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32) {
            self.draws.push((indices, base_vertex));
        }
    }

    fn quad_list(quads: usize) -> DrawList {
        let vertices = vec![DrawVert::default(); quads * 4];
        let indices = (0..quads as u16)
            .flat_map(|q| [0, 1, 2, 0, 2, 3].map(|i| q * 4 + i))
            .collect();
        let commands = vec![DrawCmd::new(quads as u32 * 6, [0.0, 0.0, 800.0, 600.0])];
        DrawList::new(vertices, indices, commands)
    }

    #[test]
    fn test_frontend_configures_library() {
        let mut settings = GuiSettings::default();
        let frontend = GuiFrontend::new(ScriptedLibrary::default(), &mut settings);
        assert!(frontend.library().keyboard_navigation);
        assert!(frontend.library().clipboard.is_some());
        assert_eq!(frontend.key_map().len(), 20);
    }

    #[test]
    fn test_frontend_uses_supplied_clipboard() {
        let mut settings = GuiSettings::new()
            .keyboard_navigation(false)
            .clipboard(MemoryClipboard::with_text("pasted"));
        let mut frontend = GuiFrontend::new(ScriptedLibrary::default(), &mut settings);
        assert!(settings.clipboard.is_none());
        assert!(!frontend.library().keyboard_navigation);

        let clipboard = frontend.library_mut().clipboard.as_mut().unwrap();
        assert_eq!(clipboard.get().as_deref(), Some("pasted"));
    }

    #[test]
    fn test_update_commits_snapshot() {
        let mut frontend = GuiFrontend::new(ScriptedLibrary::default(), &mut GuiSettings::default());
        let mut input = InputState::new(800, 600);
        input.set_pointer_position(400.0, 300.0);
        input.push(InputEvent::MousePress {
            button: MouseButton::Left,
            position: (400.0, 300.0),
        });

        frontend.begin_frame(&mut input, 0.016).unwrap();
        let io = &frontend.library().frames[0];
        assert_eq!(io.display_size, [800.0, 600.0]);
        assert_eq!(io.mouse_pos, [400.0, 300.0]);
        assert_eq!(io.mouse_down, [true, false, false]);
        assert_eq!(frontend.io(), io);
    }

    #[test]
    fn test_want_text_input_toggles_host_capture() {
        let mut frontend = GuiFrontend::new(ScriptedLibrary::default(), &mut GuiSettings::default());
        let mut input = InputState::new(800, 600);

        frontend.library_mut().want_text_input = true;
        frontend.begin_frame(&mut input, 0.016).unwrap();
        assert!(input.text_input_enabled());

        frontend.end_frame().unwrap();
        frontend.library_mut().want_text_input = false;
        frontend.begin_frame(&mut input, 0.016).unwrap();
        assert!(!input.text_input_enabled());
    }

    #[test]
    fn test_end_frame_without_begin_draws_nothing() {
        let mut frontend = GuiFrontend::new(ScriptedLibrary::default(), &mut GuiSettings::default());
        assert_eq!(frontend.end_frame().unwrap(), None);
    }

    #[test]
    fn test_repeated_update_ends_previous_frame() {
        let mut frontend = GuiFrontend::new(ScriptedLibrary::default(), &mut GuiSettings::default());
        let mut input = InputState::new(800, 600);

        frontend.begin_frame(&mut input, 0.016).unwrap();
        frontend.begin_frame(&mut input, 0.017).unwrap();
        assert!(frontend.in_frame());

        let frames = &frontend.library().frames;
        assert_eq!(frames.len(), 2);
        assert_eq!(
            IoSnapshot {
                delta_time: 0.0,
                ..frames[0].clone()
            },
            IoSnapshot {
                delta_time: 0.0,
                ..frames[1].clone()
            }
        );
    }

    #[test]
    fn test_frame_flows_from_ui_to_draws() {
        let mut frontend = GuiFrontend::new(ScriptedLibrary::default(), &mut GuiSettings::default());
        let mut input = InputState::new(800, 600);

        let ui = frontend.begin_frame(&mut input, 0.016).unwrap();
        ui.lists.push(DrawList::new(
            vec![DrawVert::default(); 4],
            vec![0, 1, 2, 0, 2, 3],
            vec![DrawCmd::new(6, [10.0, 10.0, 100.0, 50.0])],
        ));
        let data = frontend.end_frame().unwrap().unwrap();
        assert!(!frontend.in_frame());

        let layout = FrameStaging::new().stage(&data);
        assert_eq!(layout.vertex_bytes, 4 * DrawVert::STRIDE);
        assert_eq!(layout.index_bytes, 12);

        let mut sink = CountingSink::default();
        let stats = replay(&data, (800, 600), &mut sink);
        assert_eq!(sink.draws, vec![(0..6, 0)]);
        assert_eq!(
            sink.scissors,
            vec![ScissorRect {
                x: 10,
                y: 10,
                width: 90,
                height: 40
            }]
        );
        assert_eq!(stats.index_offset, 6);
        assert_eq!(stats.vertex_offset, 4);
    }

    #[test]
    fn test_growing_frame_reallocates_once() {
        let settings = GuiSettings::default();
        let mut vertex_capacity =
            BufferCapacity::new(settings.initial_vertices * DrawVert::STRIDE);
        let mut staging = FrameStaging::new();

        // 32 quads fill the initial 128 vertices exactly.
        let frame1 = DrawData::new([800.0, 600.0], vec![quad_list(32)]);
        let layout1 = staging.stage(&frame1);
        assert_eq!(vertex_capacity.grow(layout1.vertex_bytes), None);
        let frame1_generation = vertex_capacity.generation();

        let frame2 = DrawData::new([800.0, 600.0], vec![quad_list(32), quad_list(32)]);
        let layout2 = staging.stage(&frame2);
        assert_eq!(layout2.vertex_bytes, 2 * layout1.vertex_bytes);
        let grown = vertex_capacity
            .grow(layout2.vertex_bytes)
            .expect("second frame must reallocate");
        assert!(grown >= layout2.vertex_bytes);
        assert_eq!(vertex_capacity.generation(), frame1_generation + 1);
        assert_eq!(vertex_capacity.grow(layout2.vertex_bytes), None);

        let mut sink = CountingSink::default();
        let stats = replay(&frame2, (800, 600), &mut sink);
        assert_eq!(sink.draws, vec![(0..192, 0), (192..384, 128)]);
        assert_eq!(stats.vertex_offset as usize, frame2.total_vtx_count());
        assert_eq!(stats.index_offset as usize, frame2.total_idx_count());
    }
}
