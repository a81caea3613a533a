//! Sampled images
//!
//! Read-only RGBA8 images the GUI shader samples: the font atlas and images
//! the host registers. Sampling state lives with the effect, not here.

use crate::context::WgpuContext;
use wgpu::util::DeviceExt;

/// A shader-resource 2D texture, filled once at creation.
pub struct Texture2D {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl Texture2D {
    /// Create a texture from tightly packed RGBA8 rows.
    ///
    /// `format` picks how the bytes are read: `Rgba8Unorm` for coverage data
    /// such as the font atlas, `Rgba8UnormSrgb` for color images.
    pub fn from_rgba8(
        ctx: &WgpuContext,
        width: u32,
        height: u32,
        pixels: &[u8],
        format: wgpu::TextureFormat,
        label: Option<&str>,
    ) -> Self {
        debug_assert_eq!(pixels.len(), rgba8_len(width, height));
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture_with_data(
            &ctx.queue,
            &wgpu::TextureDescriptor {
                label,
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            pixels,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }

    /// View bound as the shader's texture.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Width and height in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }
}

/// Byte length of a tightly packed RGBA8 image.
pub(crate) fn rgba8_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_len() {
        assert_eq!(rgba8_len(0, 16), 0);
        assert_eq!(rgba8_len(64, 64), 16_384);
        assert_eq!(rgba8_len(512, 3), 6_144);
    }
}
