//! Effects
//!
//! Named shader programs compiled on demand, plus the parameter set of the GUI
//! shader.

mod gui;

pub use gui::{GuiEffect, GuiUniforms};

use crate::context::WgpuContext;
use crate::gui::error::{GuiError, Result};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the built-in GUI shader.
pub const IMGUI_EFFECT: &str = "ImGuiShader";

/// Registry of WGSL programs, compiled on first use and cached.
pub struct EffectLibrary {
    sources: HashMap<String, Cow<'static, str>>,
    modules: HashMap<String, Arc<wgpu::ShaderModule>>,
}

impl EffectLibrary {
    /// Create a library holding the built-in programs.
    pub fn new() -> Self {
        let mut library = Self {
            sources: HashMap::new(),
            modules: HashMap::new(),
        };
        library.register(IMGUI_EFFECT, include_str!("../shaders/imgui.wgsl"));
        library
    }

    /// Add or replace a program. A replaced program is recompiled on next load.
    pub fn register(&mut self, name: impl Into<String>, source: impl Into<Cow<'static, str>>) {
        let name = name.into();
        self.modules.remove(&name);
        self.sources.insert(name, source.into());
    }

    /// WGSL source of a program.
    pub fn source(&self, name: &str) -> Result<&str> {
        self.sources
            .get(name)
            .map(|source| source.as_ref())
            .ok_or_else(|| GuiError::UnknownEffect(name.to_owned()))
    }

    /// Whether a program is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// Compile a program, or return the module compiled earlier.
    pub fn load(&mut self, ctx: &WgpuContext, name: &str) -> Result<Arc<wgpu::ShaderModule>> {
        if let Some(module) = self.modules.get(name) {
            return Ok(module.clone());
        }

        let source = self.source(name)?.to_owned();
        tracing::debug!("compiling effect {}", name);
        let module = Arc::new(
            ctx.device
                .create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some(name),
                    source: wgpu::ShaderSource::Wgsl(source.into()),
                }),
        );
        self.modules.insert(name.to_owned(), module.clone());
        Ok(module)
    }
}

impl Default for EffectLibrary {
    fn default() -> Self {
        Self::new()
    }
}
