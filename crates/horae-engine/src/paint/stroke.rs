use super::Color;

/// Pen used for outlines and line segments.
///
/// `width` is in the same units as the geometry it is attached to. Strokes on
/// closed shapes are centered on the shape's edge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    #[inline]
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }

    /// Same color, width multiplied by `factor`.
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Self { width: self.width * factor, color: self.color }
    }
}
