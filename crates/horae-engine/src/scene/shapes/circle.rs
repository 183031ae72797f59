use crate::coords::Vec2;
use crate::paint::{Color, Stroke};
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Circle draw payload.
///
/// `fill` and `stroke` are independent: a stroke-only circle is an outline,
/// a fill-only circle is a disc. The stroke is centered on `radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl CircleCmd {
    #[inline]
    pub fn new(center: Vec2, radius: f32, fill: Option<Color>, stroke: Option<Stroke>) -> Self {
        Self { center, radius, fill, stroke }
    }

    /// Returns `true` when the command would not touch any pixel.
    #[inline]
    pub fn is_invisible(&self) -> bool {
        let stroke_visible = self.stroke.is_some_and(|s| s.width > 0.0 && s.color.a > 0.0);
        let fill_visible = self.fill.is_some_and(|c| c.a > 0.0) && self.radius > 0.0;
        !(stroke_visible || fill_visible)
    }
}

impl DrawList {
    /// Records a circle draw command.
    #[inline]
    pub fn push_circle(
        &mut self,
        z: ZIndex,
        center: Vec2,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    ) {
        self.push(z, DrawCmd::Circle(CircleCmd::new(center, radius, fill, stroke)));
    }

    /// Records a solid disc.
    #[inline]
    pub fn push_solid_circle(&mut self, z: ZIndex, center: Vec2, radius: f32, color: Color) {
        self.push_circle(z, center, radius, Some(color), None);
    }

    /// Records an outline without fill.
    #[inline]
    pub fn push_circle_outline(&mut self, z: ZIndex, center: Vec2, radius: f32, stroke: Stroke) {
        self.push_circle(z, center, radius, None, Some(stroke));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_has_no_fill() {
        let mut list = DrawList::new();
        let stroke = Stroke::new(2.0, Color::from_hex_rgb(0xD3D3D3));
        list.push_circle_outline(ZIndex(0), Vec2::zero(), 120.0, stroke);

        let DrawCmd::Circle(c) = &list.items()[0].cmd else { panic!("expected circle") };
        assert_eq!(c.fill, None);
        assert_eq!(c.stroke, Some(stroke));
    }

    #[test]
    fn visibility() {
        let white = Color::from_hex_rgb(0xFFFFFF);
        assert!(CircleCmd::new(Vec2::zero(), 5.0, None, None).is_invisible());
        assert!(CircleCmd::new(Vec2::zero(), 5.0, Some(Color::transparent()), None).is_invisible());
        assert!(CircleCmd::new(Vec2::zero(), 0.0, Some(white), None).is_invisible());
        assert!(!CircleCmd::new(Vec2::zero(), 0.0, None, Some(Stroke::new(1.0, white))).is_invisible());
    }
}
