//! Frame staging
//!
//! Packs every draw list of a frame into one vertex block and one index block,
//! in list order with no gaps, so each GPU buffer is written once per frame.

use crate::core::buffer::align_to_copy;
use crate::gui::draw::DrawData;
use std::ops::Range;

/// Where one draw list landed in the staged blocks, in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRange {
    pub vertices: Range<u64>,
    pub indices: Range<u64>,
}

/// Byte layout of a staged frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadLayout {
    pub lists: Vec<ListRange>,
    /// Vertex bytes of the frame.
    pub vertex_bytes: u64,
    /// Index bytes of the frame.
    pub index_bytes: u64,
}

impl UploadLayout {
    /// Vertex bytes to upload, padded to the copy alignment.
    pub fn vertex_upload_bytes(&self) -> u64 {
        align_to_copy(self.vertex_bytes)
    }

    /// Index bytes to upload, padded to the copy alignment.
    pub fn index_upload_bytes(&self) -> u64 {
        align_to_copy(self.index_bytes)
    }
}

/// Reusable CPU-side blocks for one frame of GUI geometry.
#[derive(Debug, Default)]
pub struct FrameStaging {
    vertices: Vec<u8>,
    indices: Vec<u8>,
}

impl FrameStaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the frame's geometry into the staging blocks.
    pub fn stage(&mut self, data: &DrawData) -> UploadLayout {
        self.vertices.clear();
        self.indices.clear();

        let mut lists = Vec::with_capacity(data.lists.len());
        for list in &data.lists {
            let vertex_start = self.vertices.len() as u64;
            let index_start = self.indices.len() as u64;
            self.vertices
                .extend_from_slice(bytemuck::cast_slice(&list.vertices));
            self.indices.extend_from_slice(bytemuck::cast_slice(&list.indices));
            lists.push(ListRange {
                vertices: vertex_start..self.vertices.len() as u64,
                indices: index_start..self.indices.len() as u64,
            });
        }

        let layout = UploadLayout {
            lists,
            vertex_bytes: self.vertices.len() as u64,
            index_bytes: self.indices.len() as u64,
        };

        self.vertices.resize(layout.vertex_upload_bytes() as usize, 0);
        self.indices.resize(layout.index_upload_bytes() as usize, 0);
        layout
    }

    /// Staged vertex block, padded.
    pub fn vertex_block(&self) -> &[u8] {
        &self.vertices
    }

    /// Staged index block, padded.
    pub fn index_block(&self) -> &[u8] {
        &self.indices
    }
}
