//! Render state configurations
//!
//! Small enums and structs for the pipeline and pass states the bridge uses.

/// Clear state for the color attachment of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClearState {
    /// Color to clear to (RGBA), or None to keep the existing contents.
    pub color: Option<[f32; 4]>,
}

impl ClearState {
    /// Clear the color attachment.
    pub fn color(color: [f32; 4]) -> Self {
        Self { color: Some(color) }
    }

    /// Keep whatever was rendered before (used for overlays).
    pub fn load() -> Self {
        Self { color: None }
    }

    /// Get the wgpu load operation for color.
    pub fn color_load_op(&self) -> wgpu::LoadOp<wgpu::Color> {
        match self.color {
            Some([r, g, b, a]) => wgpu::LoadOp::Clear(wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            }),
            None => wgpu::LoadOp::Load,
        }
    }
}

/// Blend state configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendState {
    /// No blending (opaque).
    #[default]
    Opaque,
    /// Source-alpha blending on color and alpha alike (straight alpha).
    NonPremultiplied,
    /// Pre-multiplied alpha blending.
    PremultipliedAlpha,
}

impl BlendState {
    /// Convert to wgpu blend state.
    pub fn to_wgpu(&self) -> Option<wgpu::BlendState> {
        match self {
            BlendState::Opaque => None,
            BlendState::NonPremultiplied => {
                let component = wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                    operation: wgpu::BlendOperation::Add,
                };
                Some(wgpu::BlendState {
                    color: component,
                    alpha: component,
                })
            }
            BlendState::PremultipliedAlpha => Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
        }
    }
}

/// Cull mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullState {
    /// No culling.
    None,
    /// Cull front faces.
    Front,
    /// Cull back faces.
    #[default]
    Back,
}

impl CullState {
    /// Convert to wgpu cull mode.
    pub fn to_wgpu(&self) -> Option<wgpu::Face> {
        match self {
            CullState::None => None,
            CullState::Front => Some(wgpu::Face::Front),
            CullState::Back => Some(wgpu::Face::Back),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_premultiplied_blends_alpha_channel_too() {
        let blend = BlendState::NonPremultiplied.to_wgpu().unwrap();
        assert_eq!(blend.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(blend.alpha.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(blend.alpha.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
    }

    #[test]
    fn test_clear_state_load_keeps_contents() {
        assert!(matches!(ClearState::load().color_load_op(), wgpu::LoadOp::Load));
        assert!(matches!(
            ClearState::color([0.1, 0.2, 0.3, 1.0]).color_load_op(),
            wgpu::LoadOp::Clear(_)
        ));
    }

    #[test]
    fn test_cull_none_disables_culling() {
        assert_eq!(CullState::None.to_wgpu(), None);
        assert_eq!(CullState::default().to_wgpu(), Some(wgpu::Face::Back));
    }
}
