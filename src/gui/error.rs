//! GUI bridge error types.

use thiserror::Error;

/// Errors raised while setting up or driving the GUI bridge.
#[derive(Error, Debug)]
pub enum GuiError {
    /// The GUI library could not create its context.
    #[error("failed to create GUI context: {0}")]
    ContextCreation(String),

    /// Another GUI context is active, so this one cannot be made current.
    #[error("another GUI context is active")]
    ContextBusy,

    /// A frame was ended without being started.
    #[error("no GUI frame in progress")]
    NoFrame,

    /// No effect with this name is registered.
    #[error("effect '{0}' is not registered")]
    UnknownEffect(String),

    /// Pipeline creation failed.
    #[error("pipeline creation failed: {0}")]
    Pipeline(String),

    /// The font atlas pixel data does not match its dimensions.
    #[error("font atlas is {width}x{height} but has {len} bytes of RGBA data")]
    InvalidFontAtlas { width: u32, height: u32, len: usize },

    /// The render target format differs from the one the pipeline was built for.
    #[error("render target format {actual:?} does not match pipeline format {expected:?}")]
    TargetFormatMismatch {
        expected: wgpu::TextureFormat,
        actual: wgpu::TextureFormat,
    },
}

/// A specialized Result type for GUI bridge operations.
pub type Result<T> = std::result::Result<T, GuiError>;
