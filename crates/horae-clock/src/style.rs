//! Drawing resources: colors, pens and font styles in design units.

use horae_engine::paint::{Color, Stroke};
use horae_engine::text::FontId;

/// Side of the square design space the face is drawn in.
pub const DESIGN_EXTENT: f32 = 270.0;
/// Smallest design → logical scale, for degenerate viewports.
pub const MIN_SCALE: f32 = 1e-3;

/// Points → pixels at 96 dpi.
const PT_TO_PX: f32 = 96.0 / 72.0;

/// 14 pt, used for the 3/6/9/12 numerals.
pub const EMPHASIZED_SIZE: f32 = 14.0 * PT_TO_PX;
/// 10 pt, used for the other numerals and the day label.
pub const REGULAR_SIZE: f32 = 10.0 * PT_TO_PX;

pub const BACKGROUND_RGB: u32 = 0x1E1E1E;
pub const PRIMARY_RGB: u32 = 0xD3D3D3; // LightGray
pub const HIGHLIGHT_RGB: u32 = 0xF08080; // LightCoral

/// Font face plus size in design units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontStyle {
    pub font: FontId,
    pub size: f32,
}

/// Immutable drawing resources, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceStyle {
    pub background: Color,
    pub primary: Color,
    pub highlight: Color,

    pub primary_pen: Stroke,
    pub thin_pen: Stroke,
    pub bold_pen: Stroke,
    pub highlight_pen: Stroke,

    pub regular: FontStyle,
    pub emphasized: FontStyle,
}

impl FaceStyle {
    /// Both font styles use `font`; only the size differs.
    pub fn new(font: FontId) -> Self {
        let primary = Color::from_hex_rgb(PRIMARY_RGB);
        let highlight = Color::from_hex_rgb(HIGHLIGHT_RGB);

        Self {
            background: Color::from_hex_rgb(BACKGROUND_RGB),
            primary,
            highlight,
            primary_pen: Stroke::new(2.0, primary),
            thin_pen: Stroke::new(1.0, primary),
            bold_pen: Stroke::new(3.0, primary),
            highlight_pen: Stroke::new(1.0, highlight),
            regular: FontStyle { font, size: REGULAR_SIZE },
            emphasized: FontStyle { font, size: EMPHASIZED_SIZE },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_sizes_convert_at_96_dpi() {
        assert!((EMPHASIZED_SIZE - 18.6667).abs() < 1e-3);
        assert!((REGULAR_SIZE - 13.3333).abs() < 1e-3);
    }

    #[test]
    fn pens_share_the_primary_color() {
        let style = FaceStyle::new(FontId::new(0));
        assert_eq!(style.primary_pen.color, style.primary);
        assert_eq!(style.thin_pen.color, style.primary);
        assert_eq!(style.bold_pen.color, style.primary);
        assert_eq!(style.highlight_pen.color, style.highlight);
        assert_eq!(
            [style.primary_pen.width, style.thin_pen.width, style.bold_pen.width, style.highlight_pen.width],
            [2.0, 1.0, 3.0, 1.0]
        );
    }
}
