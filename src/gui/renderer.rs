//! GUI renderer
//!
//! Owns every GPU resource of the overlay and draws a frame's [`DrawData`]
//! into a render pass.

use crate::context::WgpuContext;
use crate::core::buffer::DynamicBuffer;
use crate::core::pipeline::PipelineBuilder;
use crate::core::render_states::{BlendState, CullState};
use crate::core::texture::Texture2D;
use crate::effect::{EffectLibrary, GuiEffect, IMGUI_EFFECT};
use crate::gui::draw::{DrawData, DrawVert, TextureId};
use crate::gui::error::{GuiError, Result};
use crate::gui::library::FontAtlasImage;
use crate::gui::replay::{self, DrawCommandSink, ReplayStats, ScissorRect, TextureBinding};
use crate::gui::settings::GuiSettings;
use crate::gui::staging::{FrameStaging, UploadLayout};
use std::collections::HashMap;
use std::ops::Range;

/// Outcome of [`GuiRenderer::prepare`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareStats {
    pub layout: UploadLayout,
    pub vertex_buffer_grown: bool,
    pub index_buffer_grown: bool,
}

/// Pipeline, buffers and textures of the GUI overlay.
pub struct GuiRenderer {
    pipeline: wgpu::RenderPipeline,
    format: wgpu::TextureFormat,
    effect: GuiEffect,
    vertex_buffer: DynamicBuffer,
    index_buffer: DynamicBuffer,
    font_bind_group: wgpu::BindGroup,
    textures: HashMap<TextureId, wgpu::BindGroup>,
    next_texture_id: u64,
    staging: FrameStaging,
}

impl GuiRenderer {
    /// Build the pipeline for targets of `format` and allocate the initial buffers.
    ///
    /// The pipeline blends non-premultiplied alpha, culls nothing and has no
    /// depth-stencil state. It is never rebuilt, so every target drawn into
    /// must have `format`.
    pub fn new(
        ctx: &WgpuContext,
        effects: &mut EffectLibrary,
        format: wgpu::TextureFormat,
        font: &FontAtlasImage,
        settings: &GuiSettings,
    ) -> Result<Self> {
        let module = effects.load(ctx, IMGUI_EFFECT)?;
        let effect = GuiEffect::new(ctx, format);
        let [uniform_layout, texture_layout] = effect.bind_group_layouts();

        let pipeline = PipelineBuilder::new(ctx)
            .label("gui pipeline")
            .shader(&module)
            .vertex_layout(DrawVert::layout())
            .bind_group_layout(uniform_layout)
            .bind_group_layout(texture_layout)
            .color_format(format)
            .blend(BlendState::NonPremultiplied)
            .cull(CullState::None)
            .polygon_mode(wgpu::PolygonMode::Fill)
            .topology(wgpu::PrimitiveTopology::TriangleList)
            .build()?;

        let vertex_buffer = DynamicBuffer::vertices(
            ctx,
            settings.initial_vertices,
            DrawVert::STRIDE,
            "gui vertex buffer",
        );
        let index_buffer = DynamicBuffer::indices_u16(ctx, settings.initial_indices, "gui index buffer");

        let font_texture = Texture2D::from_rgba8(
            ctx,
            font.width,
            font.height,
            &font.pixels,
            wgpu::TextureFormat::Rgba8Unorm,
            Some("gui font atlas"),
        );
        // The bind group keeps the atlas alive.
        let font_bind_group = effect.texture_bind_group(ctx, font_texture.view(), "gui font bind group");
        let (atlas_width, atlas_height) = font_texture.size();

        tracing::debug!(
            "gui renderer ready: {:?}, font atlas {}x{}",
            format,
            atlas_width,
            atlas_height
        );

        Ok(Self {
            pipeline,
            format,
            effect,
            vertex_buffer,
            index_buffer,
            font_bind_group,
            textures: HashMap::new(),
            next_texture_id: 1,
            staging: FrameStaging::new(),
        })
    }

    /// Format the pipeline was built for.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Make `view` drawable from GUI code under the returned id.
    pub fn register_texture(&mut self, ctx: &WgpuContext, view: &wgpu::TextureView) -> TextureId {
        let id = TextureId(self.next_texture_id);
        self.next_texture_id += 1;
        let bind_group = self.effect.texture_bind_group(ctx, view, "gui user texture");
        self.textures.insert(id, bind_group);
        id
    }

    /// Forget a registered texture. Returns whether it was registered.
    pub fn unregister_texture(&mut self, id: TextureId) -> bool {
        self.textures.remove(&id).is_some()
    }

    /// Whether `id` is a registered texture.
    pub fn has_texture(&self, id: TextureId) -> bool {
        self.textures.contains_key(&id)
    }

    /// Set the projection, grow the buffers if needed, then upload the frame.
    pub fn prepare(&mut self, ctx: &WgpuContext, data: &DrawData) -> PrepareStats {
        self.effect
            .set_projection(ctx, data.display_pos, data.display_size);

        let layout = self.staging.stage(data);
        let vertex_buffer_grown = self.vertex_buffer.reserve(ctx, layout.vertex_bytes);
        let index_buffer_grown = self.index_buffer.reserve(ctx, layout.index_bytes);

        self.vertex_buffer.write(ctx, 0, self.staging.vertex_block());
        self.index_buffer.write(ctx, 0, self.staging.index_block());

        PrepareStats {
            layout,
            vertex_buffer_grown,
            index_buffer_grown,
        }
    }

    /// Replay a prepared frame into `pass`.
    ///
    /// `data` must be the frame last passed to [`prepare`](Self::prepare).
    pub fn render(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        data: &DrawData,
        framebuffer: (u32, u32),
    ) -> ReplayStats {
        if data.is_empty() {
            return ReplayStats::default();
        }

        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice());
        pass.set_index_buffer(self.index_buffer.slice(), wgpu::IndexFormat::Uint16);

        let mut sink = PassSink {
            pass,
            renderer: self,
        };
        replay::replay(data, framebuffer, &mut sink)
    }

    /// Check that a target can be drawn into with this pipeline.
    pub fn check_format(&self, format: wgpu::TextureFormat) -> Result<()> {
        if format != self.format {
            return Err(GuiError::TargetFormatMismatch {
                expected: self.format,
                actual: format,
            });
        }
        Ok(())
    }

    fn texture_bind_group(&self, binding: TextureBinding) -> &wgpu::BindGroup {
        match binding {
            TextureBinding::Font => &self.font_bind_group,
            TextureBinding::External(id) => self.textures.get(&id).unwrap_or_else(|| {
                tracing::warn!("unknown gui texture {:?}, drawing with the font atlas", id);
                &self.font_bind_group
            }),
        }
    }
}

struct PassSink<'a, 'p> {
    pass: &'a mut wgpu::RenderPass<'p>,
    renderer: &'a GuiRenderer,
}

impl DrawCommandSink for PassSink<'_, '_> {
    fn set_scissor_rect(&mut self, rect: ScissorRect) {
        self.pass
            .set_scissor_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn bind_texture(&mut self, texture: TextureBinding) {
        let bind_group = self.renderer.texture_bind_group(texture);
        self.renderer.effect.apply(self.pass, bind_group);
    }

    fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32) {
        self.pass.draw_indexed(indices, base_vertex, 0..1);
    }
}
