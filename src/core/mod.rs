//! Core rendering abstractions
//!
//! This module provides mid-level abstractions over wgpu primitives.

pub mod buffer;
pub mod pipeline;
pub mod render_states;
pub mod render_target;
pub mod texture;

pub use buffer::{BufferCapacity, DynamicBuffer};
pub use pipeline::PipelineBuilder;
pub use render_states::{BlendState, ClearState, CullState};
pub use render_target::RenderTarget;
pub use texture::Texture2D;
