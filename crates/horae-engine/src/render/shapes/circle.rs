use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::CircleCmd;

use super::common::InstancedPass;

/// Renderer for `DrawCmd::Circle`.
///
/// Discs and outlines share one SDF shader: the fill covers `radius`, the
/// stroke is an AA ring centered on `radius`, composited over the fill.
pub struct CircleRenderer {
    pass: InstancedPass<CircleInstance>,
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self {
            pass: InstancedPass::new(
                "horae circle",
                include_str!("shaders/circle.wgsl"),
                CircleInstance::layout,
            ),
        }
    }

    pub fn clear(&mut self) {
        self.pass.clear();
    }

    /// Records `cmd`; returns the number of instances added (0 or 1).
    pub fn push(&mut self, cmd: &CircleCmd) -> u32 {
        match CircleInstance::from_cmd(cmd) {
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

impl Default for CircleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  center        [f32; 2]   loc 1
///  offset  8  radius_stroke [f32; 2]   loc 2  (.x = radius, .y = stroke width)
///  offset 16  fill          [f32; 4]   loc 3
///  offset 32  stroke        [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius_stroke: [f32; 2],
    fill: [f32; 4],
    stroke: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius_stroke
        3 => Float32x4, // fill
        4 => Float32x4  // stroke
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// `None` for commands that cannot produce visible pixels.
    fn from_cmd(cmd: &CircleCmd) -> Option<Self> {
        if cmd.is_invisible() || !cmd.center.is_finite() || !cmd.radius.is_finite() {
            return None;
        }

        let (stroke_width, stroke) = match cmd.stroke {
            Some(s) => (s.width.max(0.0), s.color.to_array()),
            None => (0.0, [0.0; 4]),
        };

        Some(Self {
            center: [cmd.center.x, cmd.center.y],
            radius_stroke: [cmd.radius.max(0.0), stroke_width],
            fill: cmd.fill.map_or([0.0; 4], |c| c.to_array()),
            stroke,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{Color, Stroke};

    #[test]
    fn instance_layout_is_48_bytes() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 48);
    }

    #[test]
    fn outline_has_transparent_fill() {
        let gray = Color::from_hex_rgb(0xD3D3D3);
        let cmd = CircleCmd::new(Vec2::new(5.0, 6.0), 120.0, None, Some(Stroke::new(2.0, gray)));
        let inst = CircleInstance::from_cmd(&cmd).unwrap();
        assert_eq!(inst.center, [5.0, 6.0]);
        assert_eq!(inst.radius_stroke, [120.0, 2.0]);
        assert_eq!(inst.fill, [0.0; 4]);
        assert_eq!(inst.stroke, gray.to_array());
    }

    #[test]
    fn invisible_and_non_finite_commands_are_dropped() {
        let white = Color::from_hex_rgb(0xFFFFFF);
        assert!(CircleInstance::from_cmd(&CircleCmd::new(Vec2::zero(), 3.0, None, None)).is_none());
        assert!(
            CircleInstance::from_cmd(&CircleCmd::new(Vec2::new(f32::NAN, 0.0), 3.0, Some(white), None))
                .is_none()
        );
    }
}
