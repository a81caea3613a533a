//! Rein ImGui
//!
//! An immediate-mode GUI bridge for the rein engine, built on wgpu.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **context** - Core wgpu wrapper (Device, Queue)
//! 2. **core** - GPU primitives (growable buffers, textures, pipelines)
//! 3. **effect** - Named shader programs and the GUI shader parameters
//! 4. **input** - Host input events and polled state
//! 5. **gui** - The bridge: input translation, buffer management, draw replay
//! 6. **window** - Window management with winit (feature = "window")
//!
//! Each frame the host calls [`GuiBridge::update`] before updating its scene
//! and [`GuiBridge::draw`] after rendering it, then presents.
//!
//! With the `imgui` feature, [`ImguiLibrary`] plugs Dear ImGui into the bridge.

pub mod context;
pub mod core;
pub mod effect;
pub mod gui;
pub mod input;

#[cfg(feature = "window")]
pub mod window;

// Re-export commonly used types
pub use context::WgpuContext;

pub use core::{
    BlendState, BufferCapacity, ClearState, CullState, DynamicBuffer, PipelineBuilder,
    RenderTarget, Texture2D,
};

pub use effect::{EffectLibrary, GuiEffect, IMGUI_EFFECT};

pub use input::{InputEvent, InputSource, InputState, Key, Modifiers, MouseButton};

pub use gui::{
    ClipboardBackend, DrawCmd, DrawData, DrawList, DrawVert, FrameStats, GuiBridge, GuiError,
    GuiKey, GuiLibrary, GuiSettings, IoSnapshot, KeyMap, MemoryClipboard, TextureId,
};

#[cfg(feature = "imgui")]
pub use gui::ImguiLibrary;

#[cfg(feature = "window")]
pub use window::{screen_target, FrameInput, FrameOutput, Viewport, Window, WindowSettings};

// Re-export the GUI library and glam for convenience
#[cfg(feature = "imgui")]
pub use imgui;

pub use glam;
