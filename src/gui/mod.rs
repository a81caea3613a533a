//! GUI module
//!
//! Bridges an immediate-mode GUI library into the frame: input translation,
//! growable geometry buffers and scissor-clipped replay of its draw lists.

pub mod bridge;
pub mod clipboard;
pub mod draw;
pub mod error;
#[cfg(feature = "imgui")]
pub mod imgui_backend;
pub mod io;
pub mod library;
pub mod renderer;
pub mod replay;
pub mod settings;
pub mod staging;

pub use bridge::{FrameStats, GuiBridge, GuiFrontend};
pub use clipboard::{ClipboardBackend, MemoryClipboard};
pub use draw::{DrawCmd, DrawData, DrawIdx, DrawList, DrawVert, TextureId};
pub use error::{GuiError, Result};
#[cfg(feature = "imgui")]
pub use imgui_backend::ImguiLibrary;
pub use io::{GuiKey, IoSnapshot, IoTranslator, KeyMap};
pub use library::{FontAtlasImage, GuiLibrary};
pub use renderer::{GuiRenderer, PrepareStats};
pub use replay::{replay, DrawCommandSink, ReplayStats, ScissorRect, TextureBinding};
pub use settings::GuiSettings;
pub use staging::{FrameStaging, ListRange, UploadLayout};
