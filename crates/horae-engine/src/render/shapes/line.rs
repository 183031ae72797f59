use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::LineCmd;

use super::common::InstancedPass;

/// Segments shorter than this are not drawn (flat caps leave nothing to see).
const MIN_LENGTH: f32 = 1e-4;

/// Renderer for `DrawCmd::Line`.
///
/// Each segment is an oriented quad covering the stroke plus a 1 px AA
/// margin; the fragment shader evaluates a box SDF in segment space, so the
/// ends are flat (butt) caps.
pub struct LineRenderer {
    pass: InstancedPass<LineInstance>,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self {
            pass: InstancedPass::new(
                "horae line",
                include_str!("shaders/line.wgsl"),
                LineInstance::layout,
            ),
        }
    }

    pub fn clear(&mut self) {
        self.pass.clear();
    }

    /// Records `cmd`; returns the number of instances added (0 or 1).
    pub fn push(&mut self, cmd: &LineCmd) -> u32 {
        match LineInstance::from_cmd(cmd) {
            Some(instance) => {
                self.pass.push(instance);
                1
            }
            None => 0,
        }
    }

    pub fn len(&self) -> u32 {
        self.pass.len()
    }

    pub fn upload(&mut self, ctx: &RenderCtx<'_>) {
        self.pass.upload(ctx);
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        self.pass.draw(rpass, range);
    }
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (36 bytes):
///
///  offset  0  from   [f32; 2]   loc 1
///  offset  8  to     [f32; 2]   loc 2
///  offset 16  color  [f32; 4]   loc 3
///  offset 32  width  f32        loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct LineInstance {
    from: [f32; 2],
    to: [f32; 2],
    color: [f32; 4],
    width: f32,
}

impl LineInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // from
        2 => Float32x2, // to
        3 => Float32x4, // color
        4 => Float32    // width
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    fn from_cmd(cmd: &LineCmd) -> Option<Self> {
        let finite = cmd.from.is_finite() && cmd.to.is_finite() && cmd.stroke.width.is_finite();
        if !finite || cmd.length() < MIN_LENGTH || cmd.stroke.width <= 0.0 || cmd.stroke.color.a <= 0.0 {
            return None;
        }

        Some(Self {
            from: [cmd.from.x, cmd.from.y],
            to: [cmd.to.x, cmd.to.y],
            color: cmd.stroke.color.to_array(),
            width: cmd.stroke.width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{Color, Stroke};

    fn pen(width: f32) -> Stroke {
        Stroke::new(width, Color::from_hex_rgb(0xF08080))
    }

    #[test]
    fn instance_layout_is_36_bytes() {
        assert_eq!(std::mem::size_of::<LineInstance>(), 36);
    }

    #[test]
    fn segment_maps_to_instance() {
        let cmd = LineCmd::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), pen(1.5));
        let inst = LineInstance::from_cmd(&cmd).unwrap();
        assert_eq!(inst.from, [1.0, 2.0]);
        assert_eq!(inst.to, [3.0, 4.0]);
        assert_eq!(inst.width, 1.5);
    }

    #[test]
    fn degenerate_segments_are_skipped() {
        let p = Vec2::new(10.0, 10.0);
        assert!(LineInstance::from_cmd(&LineCmd::new(p, p, pen(3.0))).is_none());
        assert!(LineInstance::from_cmd(&LineCmd::new(p, Vec2::zero(), pen(0.0))).is_none());
        assert!(LineInstance::from_cmd(&LineCmd::new(p, Vec2::new(f32::INFINITY, 0.0), pen(1.0))).is_none());
    }
}
