use super::{Vec2, Viewport};

/// Uniform scale followed by a translation.
///
/// Maps a design-space point `p` to logical pixels as `offset + p * scale`.
/// Lengths (stroke widths, radii, font sizes) only see the scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub offset: Vec2,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform { offset: Vec2::zero(), scale: 1.0 };

    #[inline]
    pub const fn new(offset: Vec2, scale: f32) -> Self {
        Self { offset, scale }
    }

    /// Centers a square design space of side `design_extent` in `viewport`,
    /// scaled uniformly so it fits the smaller viewport dimension.
    ///
    /// The scale never drops below `min_scale`, so zero or negative viewport
    /// sizes still yield a usable transform.
    pub fn fit(viewport: Viewport, design_extent: f32, min_scale: f32) -> Self {
        let scale = viewport.min_dimension() / design_extent;
        let scale = if scale.is_finite() { scale.max(min_scale) } else { min_scale };
        Self { offset: viewport.center(), scale }
    }

    #[inline]
    pub fn apply(&self, p: Vec2) -> Vec2 {
        self.offset + p * self.scale
    }

    #[inline]
    pub fn apply_length(&self, len: f32) -> f32 {
        len * self.scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_uses_smaller_dimension() {
        let t = Transform::fit(Viewport::new(540.0, 810.0), 270.0, 1e-3);
        assert_eq!(t.scale, 2.0);
        assert_eq!(t.offset, Vec2::new(270.0, 405.0));
    }

    #[test]
    fn fit_clamps_degenerate_viewports() {
        let zero = Transform::fit(Viewport::new(0.0, 400.0), 270.0, 1e-3);
        assert_eq!(zero.scale, 1e-3);

        let negative = Transform::fit(Viewport::new(-50.0, -50.0), 270.0, 1e-3);
        assert_eq!(negative.scale, 1e-3);

        let nan = Transform::fit(Viewport::new(f32::NAN, 100.0), 270.0, 1e-3);
        assert!(nan.scale > 0.0);
    }

    #[test]
    fn apply_scales_then_translates() {
        let t = Transform::new(Vec2::new(10.0, 20.0), 3.0);
        assert_eq!(t.apply(Vec2::new(1.0, -1.0)), Vec2::new(13.0, 17.0));
        assert_eq!(t.apply_length(2.5), 7.5);
    }

    #[test]
    fn identity_is_a_no_op() {
        let p = Vec2::new(4.0, -7.5);
        assert_eq!(Transform::default().apply(p), p);
    }
}
