//! Draw command replay
//!
//! Walks a frame's draw lists and turns every command into a scissor-clipped
//! indexed draw against the staged buffers.

use crate::gui::draw::{DrawData, TextureId};
use std::ops::Range;

/// Texture a draw samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureBinding {
    /// The font atlas.
    Font,
    /// A texture registered with the renderer.
    External(TextureId),
}

impl TextureBinding {
    /// Binding for a command's optional texture.
    pub fn for_texture(texture: Option<TextureId>) -> Self {
        match texture {
            None | Some(TextureId::FONT) => TextureBinding::Font,
            Some(id) => TextureBinding::External(id),
        }
    }
}

/// Scissor rectangle in framebuffer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScissorRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ScissorRect {
    /// Convert a `[left, top, right, bottom]` clip rectangle.
    ///
    /// The rectangle is shifted by `origin`. Position and extent are each
    /// truncated to whole pixels, so `width` is `trunc(right - left)`, then the
    /// result is clamped to the framebuffer. Returns `None` if nothing is left.
    pub fn from_clip_rect(clip: [f32; 4], origin: [f32; 2], framebuffer: (u32, u32)) -> Option<Self> {
        let (x, width) = clip_span(clip[0] - origin[0], clip[2] - origin[0], framebuffer.0)?;
        let (y, height) = clip_span(clip[1] - origin[1], clip[3] - origin[1], framebuffer.1)?;
        Some(Self {
            x,
            y,
            width,
            height,
        })
    }
}

/// Start and length of `[low, high)` in whole pixels, clamped to `0..max`.
fn clip_span(low: f32, high: f32, max: u32) -> Option<(u32, u32)> {
    let start = low.trunc();
    let end = start + (high - low).trunc();
    let start = start.clamp(0.0, max as f32) as u32;
    let end = end.clamp(0.0, max as f32) as u32;
    (end > start).then(|| (start, end - start))
}

/// Receiver of replayed draw commands, usually a render pass.
pub trait DrawCommandSink {
    fn set_scissor_rect(&mut self, rect: ScissorRect);

    /// Bind the texture and apply the effect parameters for the next draw.
    fn bind_texture(&mut self, texture: TextureBinding);

    /// Draw `indices` of the bound index buffer, offset by `base_vertex`.
    fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32);
}

/// Counters of one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Indexed draws issued.
    pub draw_calls: u32,
    /// Commands dropped because their scissor rectangle was empty.
    pub skipped: u32,
    /// Index offset after the last command.
    pub index_offset: u32,
    /// Vertex offset after the last list.
    pub vertex_offset: u32,
}

/// Replay every command of `data` into `sink`.
///
/// Index and vertex offsets run across the whole frame and match the layout
/// produced by [`FrameStaging`](crate::gui::staging::FrameStaging).
pub fn replay(data: &DrawData, framebuffer: (u32, u32), sink: &mut impl DrawCommandSink) -> ReplayStats {
    let mut stats = ReplayStats::default();

    for list in &data.lists {
        for cmd in &list.commands {
            let indices = stats.index_offset..stats.index_offset + cmd.elem_count;
            stats.index_offset += cmd.elem_count;

            if cmd.elem_count == 0 {
                continue;
            }
            let Some(scissor) = ScissorRect::from_clip_rect(cmd.clip_rect, data.display_pos, framebuffer)
            else {
                stats.skipped += 1;
                continue;
            };

            sink.set_scissor_rect(scissor);
            sink.bind_texture(TextureBinding::for_texture(cmd.texture));
            sink.draw_indexed(indices, stats.vertex_offset as i32);
            stats.draw_calls += 1;
        }
        stats.vertex_offset += list.vertices.len() as u32;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::draw::{DrawCmd, DrawList, DrawVert};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Scissor(ScissorRect),
        Texture(TextureBinding),
        Draw(Range<u32>, i32),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn draws(&self) -> Vec<(Range<u32>, i32)> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    Call::Draw(range, base) => Some((range.clone(), *base)),
                    _ => None,
                })
                .collect()
        }
    }

    impl DrawCommandSink for Recorder {
        fn set_scissor_rect(&mut self, rect: ScissorRect) {
            self.calls.push(Call::Scissor(rect));
        }

        fn bind_texture(&mut self, texture: TextureBinding) {
            self.calls.push(Call::Texture(texture));
        }

        fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32) {
            self.calls.push(Call::Draw(indices, base_vertex));
        }
    }

    fn list(vertices: usize, indices: usize, commands: Vec<DrawCmd>) -> DrawList {
        DrawList::new(vec![DrawVert::default(); vertices], vec![0; indices], commands)
    }

    #[test]
    fn test_single_command() {
        let data = DrawData::new(
            [800.0, 600.0],
            vec![list(4, 6, vec![DrawCmd::new(6, [10.0, 10.0, 100.0, 50.0])])],
        );
        let mut sink = Recorder::default();
        let stats = replay(&data, (800, 600), &mut sink);

        assert_eq!(
            sink.calls,
            vec![
                Call::Scissor(ScissorRect {
                    x: 10,
                    y: 10,
                    width: 90,
                    height: 40
                }),
                Call::Texture(TextureBinding::Font),
                Call::Draw(0..6, 0),
            ]
        );
        assert_eq!(stats.draw_calls, 1);
    }

    #[test]
    fn test_offsets_accumulate_across_lists() {
        let clip = [0.0, 0.0, 800.0, 600.0];
        let data = DrawData::new(
            [800.0, 600.0],
            vec![
                list(4, 9, vec![DrawCmd::new(6, clip), DrawCmd::new(3, clip)]),
                list(5, 12, vec![DrawCmd::new(12, clip)]),
                list(3, 3, vec![DrawCmd::new(3, clip)]),
            ],
        );
        let mut sink = Recorder::default();
        let stats = replay(&data, (800, 600), &mut sink);

        assert_eq!(
            sink.draws(),
            vec![(0..6, 0), (6..9, 0), (9..21, 4), (21..24, 9)]
        );
        assert_eq!(stats.index_offset as usize, data.total_idx_count());
        assert_eq!(stats.vertex_offset as usize, data.total_vtx_count());
    }

    #[test]
    fn test_clipped_out_command_still_advances_offsets() {
        let data = DrawData::new(
            [800.0, 600.0],
            vec![list(
                4,
                12,
                vec![
                    DrawCmd::new(6, [900.0, 0.0, 1000.0, 100.0]),
                    DrawCmd::new(6, [0.0, 0.0, 10.0, 10.0]),
                ],
            )],
        );
        let mut sink = Recorder::default();
        let stats = replay(&data, (800, 600), &mut sink);

        assert_eq!(sink.draws(), vec![(6..12, 0)]);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.index_offset, 12);
    }

    #[test]
    fn test_external_texture_binding() {
        let clip = [0.0, 0.0, 64.0, 64.0];
        let data = DrawData::new(
            [800.0, 600.0],
            vec![list(
                8,
                12,
                vec![
                    DrawCmd::new(6, clip).with_texture(TextureId(3)),
                    DrawCmd::new(6, clip).with_texture(TextureId::FONT),
                ],
            )],
        );
        let mut sink = Recorder::default();
        replay(&data, (800, 600), &mut sink);

        let textures: Vec<_> = sink
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Texture(binding) => Some(*binding),
                _ => None,
            })
            .collect();
        assert_eq!(
            textures,
            vec![TextureBinding::External(TextureId(3)), TextureBinding::Font]
        );
    }

    #[test]
    fn test_scissor_is_clamped_to_framebuffer() {
        let rect = ScissorRect::from_clip_rect([-5.0, 590.0, 900.0, 700.0], [0.0, 0.0], (800, 600));
        assert_eq!(
            rect,
            Some(ScissorRect {
                x: 0,
                y: 590,
                width: 800,
                height: 10
            })
        );
        assert_eq!(
            ScissorRect::from_clip_rect([50.0, 50.0, 50.0, 80.0], [0.0, 0.0], (800, 600)),
            None
        );
    }

    #[test]
    fn test_scissor_extent_truncates_difference() {
        let rect = ScissorRect::from_clip_rect([10.5, 10.5, 100.2, 50.2], [0.0, 0.0], (800, 600));
        assert_eq!(
            rect,
            Some(ScissorRect {
                x: 10,
                y: 10,
                width: 89,
                height: 39
            })
        );
    }

    #[test]
    fn test_scissor_relative_to_display_origin() {
        let rect = ScissorRect::from_clip_rect([110.0, 60.0, 200.0, 100.0], [100.0, 50.0], (800, 600));
        assert_eq!(
            rect,
            Some(ScissorRect {
                x: 10,
                y: 10,
                width: 90,
                height: 40
            })
        );
    }
}
