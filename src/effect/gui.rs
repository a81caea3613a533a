//! GUI shader parameters

use crate::context::WgpuContext;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

/// Uniform block of the GUI shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GuiUniforms {
    pub proj: [[f32; 4]; 4],
    /// `x` is 1.0 when vertex colors must be linearized.
    pub gamma: [f32; 4],
}

impl GuiUniforms {
    pub fn new(proj: Mat4, linearize: bool) -> Self {
        Self {
            proj: proj.to_cols_array_2d(),
            gamma: [if linearize { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

/// Orthographic projection of the display rectangle, Y pointing down.
pub fn projection(display_pos: [f32; 2], display_size: [f32; 2]) -> Mat4 {
    let [left, top] = display_pos;
    let right = left + display_size[0];
    let bottom = top + display_size[1];
    Mat4::orthographic_rh(left, right, bottom, top, -1.0, 1.0)
}

/// Bound parameters of the GUI shader: projection uniform (group 0) and
/// texture + sampler (group 1).
pub struct GuiEffect {
    uniform_buffer: wgpu::Buffer,
    uniform_layout: wgpu::BindGroupLayout,
    uniform_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    linearize: bool,
}

impl GuiEffect {
    /// Create the parameter set for a target of `format`.
    pub fn new(ctx: &WgpuContext, format: wgpu::TextureFormat) -> Self {
        let linearize = format.is_srgb();

        let uniform_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("gui uniform buffer"),
                contents: bytemuck::bytes_of(&GuiUniforms::new(Mat4::IDENTITY, linearize)),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let uniform_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("gui uniform layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let uniform_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gui uniform bind group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("gui texture layout"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("gui sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        Self {
            uniform_buffer,
            uniform_layout,
            uniform_bind_group,
            texture_layout,
            sampler,
            linearize,
        }
    }

    /// Bind group layouts in group order.
    pub fn bind_group_layouts(&self) -> [&wgpu::BindGroupLayout; 2] {
        [&self.uniform_layout, &self.texture_layout]
    }

    /// Whether vertex colors are converted to linear for this target.
    pub fn linearizes_colors(&self) -> bool {
        self.linearize
    }

    /// Set the projection for the display rectangle.
    pub fn set_projection(&self, ctx: &WgpuContext, display_pos: [f32; 2], display_size: [f32; 2]) {
        let uniforms = GuiUniforms::new(projection(display_pos, display_size), self.linearize);
        ctx.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Create the texture parameter for `view`.
    pub fn texture_bind_group(
        &self,
        ctx: &WgpuContext,
        view: &wgpu::TextureView,
        label: &str,
    ) -> wgpu::BindGroup {
        ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }

    /// Apply the bound parameters before a draw.
    pub fn apply(&self, pass: &mut wgpu::RenderPass<'_>, texture: &wgpu::BindGroup) {
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        pass.set_bind_group(1, texture, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn project(proj: Mat4, x: f32, y: f32) -> Vec4 {
        proj * Vec4::new(x, y, 0.0, 1.0)
    }

    #[test]
    fn test_projection_flips_y() {
        let proj = projection([0.0, 0.0], [800.0, 600.0]);

        let top_left = project(proj, 0.0, 0.0);
        assert!((top_left.x + 1.0).abs() < 1e-6);
        assert!((top_left.y - 1.0).abs() < 1e-6);

        let bottom_right = project(proj, 800.0, 600.0);
        assert!((bottom_right.x - 1.0).abs() < 1e-6);
        assert!((bottom_right.y + 1.0).abs() < 1e-6);

        let depth = top_left.z;
        assert!((0.0..=1.0).contains(&depth));
    }

    #[test]
    fn test_projection_follows_display_origin() {
        let proj = projection([100.0, 50.0], [200.0, 100.0]);
        let origin = project(proj, 100.0, 50.0);
        assert!((origin.x + 1.0).abs() < 1e-6);
        assert!((origin.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<GuiUniforms>(), 80);
        let uniforms = GuiUniforms::new(Mat4::IDENTITY, true);
        assert_eq!(uniforms.gamma[0], 1.0);
        assert_eq!(GuiUniforms::new(Mat4::IDENTITY, false).gamma[0], 0.0);
    }
}
