//! Draw data produced by the GUI library each frame.
//!
//! The bridge only reads these structures. One [`DrawData`] is consumed per
//! frame and not retained.

use bytemuck::{Pod, Zeroable};

/// GUI vertex: 2D position, texture coordinate and 8-bit RGBA color.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DrawVert {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub col: [u8; 4],
}

impl DrawVert {
    /// Size of one vertex in bytes.
    pub const STRIDE: u64 = std::mem::size_of::<DrawVert>() as u64;

    pub const fn new(pos: [f32; 2], uv: [f32; 2], col: [u8; 4]) -> Self {
        Self { pos, uv, col }
    }

    /// Get the vertex buffer layout for this vertex type.
    pub const fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // uv
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Unorm8x4,
                },
            ],
        }
    }
}

/// Index type of GUI draw lists. Always 16-bit.
pub type DrawIdx = u16;

/// Size of one index in bytes.
pub const INDEX_SIZE: u64 = std::mem::size_of::<DrawIdx>() as u64;

/// Handle of a texture a draw command samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

impl TextureId {
    /// The font atlas. User textures are numbered from 1.
    pub const FONT: TextureId = TextureId(0);
}

/// One scissor-clipped indexed draw within a draw list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCmd {
    /// Number of indices to draw.
    pub elem_count: u32,
    /// Clip rectangle as `[left, top, right, bottom]` in framebuffer pixels.
    pub clip_rect: [f32; 4],
    /// Texture to sample, or `None` for the font atlas.
    pub texture: Option<TextureId>,
}

impl DrawCmd {
    pub fn new(elem_count: u32, clip_rect: [f32; 4]) -> Self {
        Self {
            elem_count,
            clip_rect,
            texture: None,
        }
    }

    /// Sample `texture` instead of the font atlas.
    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }
}

/// A batch of vertices and indices with the commands that draw them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub vertices: Vec<DrawVert>,
    pub indices: Vec<DrawIdx>,
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new(vertices: Vec<DrawVert>, indices: Vec<DrawIdx>, commands: Vec<DrawCmd>) -> Self {
        Self {
            vertices,
            indices,
            commands,
        }
    }

    /// Vertex bytes of this list.
    pub fn vertex_bytes(&self) -> u64 {
        self.vertices.len() as u64 * DrawVert::STRIDE
    }

    /// Index bytes of this list.
    pub fn index_bytes(&self) -> u64 {
        self.indices.len() as u64 * INDEX_SIZE
    }
}

/// Everything the GUI library wants drawn this frame, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawData {
    /// Top-left of the displayed area; clip rectangles are relative to it.
    pub display_pos: [f32; 2],
    /// Size of the displayed area in pixels.
    pub display_size: [f32; 2],
    pub lists: Vec<DrawList>,
}

impl DrawData {
    pub fn new(display_size: [f32; 2], lists: Vec<DrawList>) -> Self {
        Self {
            display_pos: [0.0, 0.0],
            display_size,
            lists,
        }
    }

    /// Whether the frame has no indices, and so nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.total_idx_count() == 0
    }

    /// Total vertex count over all lists.
    pub fn total_vtx_count(&self) -> usize {
        self.lists.iter().map(|list| list.vertices.len()).sum()
    }

    /// Total index count over all lists.
    pub fn total_idx_count(&self) -> usize {
        self.lists.iter().map(|list| list.indices.len()).sum()
    }

    /// Vertex bytes required for this frame.
    pub fn vertex_bytes(&self) -> u64 {
        self.total_vtx_count() as u64 * DrawVert::STRIDE
    }

    /// Index bytes required for this frame.
    pub fn index_bytes(&self) -> u64 {
        self.total_idx_count() as u64 * INDEX_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_stride_and_layout() {
        assert_eq!(DrawVert::STRIDE, 20);
        let layout = DrawVert::layout();
        assert_eq!(layout.array_stride, 20);
        assert_eq!(layout.attributes[2].offset, 16);
        assert_eq!(layout.attributes[2].format, wgpu::VertexFormat::Unorm8x4);
    }

    #[test]
    fn test_totals_sum_over_lists() {
        let data = DrawData::new(
            [800.0, 600.0],
            vec![
                DrawList::new(vec![DrawVert::default(); 4], vec![0; 6], vec![]),
                DrawList::new(vec![DrawVert::default(); 3], vec![0; 3], vec![]),
            ],
        );
        assert_eq!(data.total_vtx_count(), 7);
        assert_eq!(data.total_idx_count(), 9);
        assert_eq!(data.vertex_bytes(), 140);
        assert_eq!(data.index_bytes(), 18);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_frame_without_indices_is_empty() {
        assert!(DrawData::default().is_empty());
        let vertices_only = DrawData::new(
            [800.0, 600.0],
            vec![DrawList::new(vec![DrawVert::default(); 4], vec![], vec![])],
        );
        assert!(vertices_only.is_empty());
    }
}
