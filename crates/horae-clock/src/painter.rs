use horae_engine::coords::{Transform, Vec2};
use horae_engine::paint::{Color, Stroke};
use horae_engine::scene::{DrawList, TextAlign, ZIndex};

use crate::style::FontStyle;

/// Drawing surface for the clock face.
///
/// Takes geometry in design units, maps it through `transform` (positions,
/// radii, pen widths and font sizes) and records it into the draw list.
/// Every command gets the next z-index, so paint order is record order.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    transform: Transform,
    z: i32,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, transform: Transform) -> Self {
        Self { draw_list, transform, z: 0 }
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex(self.z);
        self.z += 1;
        z
    }

    // ── shapes ────────────────────────────────────────────────────────────

    /// Circle outline centered on `center`; the pen straddles the edge.
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, pen: Stroke) {
        let z = self.next_z();
        let t = self.transform;
        self.draw_list.push_circle_outline(
            z,
            t.apply(center),
            t.apply_length(radius),
            pen.scaled(t.scale),
        );
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let z = self.next_z();
        let t = self.transform;
        self.draw_list.push_solid_circle(z, t.apply(center), t.apply_length(radius), color);
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, pen: Stroke) {
        let z = self.next_z();
        let t = self.transform;
        self.draw_list.push_line(z, t.apply(from), t.apply(to), pen.scaled(t.scale));
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// Single line of text whose line box is centered on `center`.
    pub fn text_centered(&mut self, text: impl Into<String>, style: FontStyle, color: Color, center: Vec2) {
        let z = self.next_z();
        let t = self.transform;
        self.draw_list.push_text(
            z,
            text,
            style.font,
            t.apply_length(style.size),
            color,
            t.apply(center),
            TextAlign::Center,
        );
    }
}
