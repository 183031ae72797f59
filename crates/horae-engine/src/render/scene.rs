use std::ops::Range;

use crate::render::shapes::circle::CircleRenderer;
use crate::render::shapes::line::LineRenderer;
use crate::render::shapes::text::TextRenderer;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawKind, DrawList};
use crate::text::FontSystem;

/// A run of consecutive same-kind commands, drawn with one instanced call.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    kind: DrawKind,
    range: Range<u32>,
}

/// Appends `count` instances starting at `start` for `kind`, merging into the
/// previous batch when it is the same kind and contiguous.
fn extend_batches(batches: &mut Vec<Batch>, kind: DrawKind, start: u32, count: u32) {
    if count == 0 {
        return;
    }

    if let Some(last) = batches.last_mut() {
        if last.kind == kind && last.range.end == start {
            last.range.end += count;
            return;
        }
    }

    batches.push(Batch { kind, range: start..start + count });
}

/// Draws a whole [`DrawList`] with the shape renderers.
///
/// Commands are walked in paint order and split into batches wherever the
/// shape kind changes; all batches go into one render pass, so a circle
/// recorded after a line paints over it regardless of renderer.
#[derive(Default)]
pub struct SceneRenderer {
    circles: CircleRenderer,
    lines: LineRenderer,
    text: TextRenderer,

    batches: Vec<Batch>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `draw_list` on top of the target's current contents.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.circles.clear();
        self.lines.clear();
        self.text.clear();
        self.batches.clear();

        // Glyphs must be resident before any text is pushed.
        let texts = draw_list.items().iter().filter_map(|item| match &item.cmd {
            DrawCmd::Text(cmd) => Some(cmd),
            _ => None,
        });
        self.text.prepare(ctx, fonts, texts);

        for item in draw_list.iter_in_paint_order() {
            let kind = item.cmd.kind();
            let (start, count) = match &item.cmd {
                DrawCmd::Circle(cmd) => (self.circles.len(), self.circles.push(cmd)),
                DrawCmd::Line(cmd) => (self.lines.len(), self.lines.push(cmd)),
                DrawCmd::Text(cmd) => (self.text.len(), self.text.push(ctx, fonts, cmd)),
            };
            extend_batches(&mut self.batches, kind, start, count);
        }

        if self.batches.is_empty() {
            return;
        }

        self.circles.upload(ctx);
        self.lines.upload(ctx);
        self.text.upload(ctx);

        log::trace!(
            "scene: {} commands in {} batches",
            draw_list.len(),
            self.batches.len()
        );

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("horae scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for batch in &self.batches {
            match batch.kind {
                DrawKind::Circle => self.circles.draw(&mut rpass, batch.range.clone()),
                DrawKind::Line => self.lines.draw(&mut rpass, batch.range.clone()),
                DrawKind::Text => self.text.draw(&mut rpass, batch.range.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(kind: DrawKind, range: Range<u32>) -> Batch {
        Batch { kind, range }
    }

    #[test]
    fn consecutive_same_kind_merges() {
        let mut b = Vec::new();
        extend_batches(&mut b, DrawKind::Line, 0, 1);
        extend_batches(&mut b, DrawKind::Line, 1, 1);
        extend_batches(&mut b, DrawKind::Line, 2, 1);
        assert_eq!(b, vec![batch(DrawKind::Line, 0..3)]);
    }

    #[test]
    fn kind_change_splits_batches() {
        let mut b = Vec::new();
        extend_batches(&mut b, DrawKind::Circle, 0, 1);
        extend_batches(&mut b, DrawKind::Text, 0, 2);
        extend_batches(&mut b, DrawKind::Line, 0, 1);
        extend_batches(&mut b, DrawKind::Text, 2, 3);
        assert_eq!(b, vec![
            batch(DrawKind::Circle, 0..1),
            batch(DrawKind::Text, 0..2),
            batch(DrawKind::Line, 0..1),
            batch(DrawKind::Text, 2..5),
        ]);
    }

    #[test]
    fn skipped_commands_do_not_split_a_run() {
        let mut b = Vec::new();
        extend_batches(&mut b, DrawKind::Line, 0, 1);
        extend_batches(&mut b, DrawKind::Circle, 0, 0);
        extend_batches(&mut b, DrawKind::Line, 1, 1);
        assert_eq!(b, vec![batch(DrawKind::Line, 0..2)]);
    }
}
