use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
///
/// Handles that do not belong to the system a command is rendered with are
/// skipped by the text renderer (with a warning) and measure as empty.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

impl FontId {
    /// Builds a handle from its slot index in a [`FontSystem`].
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }
}

/// Pixel size glyphs are rasterized at: `size * scale`, snapped to 0.25 px.
///
/// Snapping keeps the glyph cache from filling with near-identical sizes while
/// a window is being resized. Never returns less than 1 px.
#[inline]
pub fn raster_px(size: f32, scale: f32) -> f32 {
    ((size * scale.max(0.01) * 4.0).round() / 4.0).max(1.0)
}

/// Owns a collection of loaded fonts.
///
/// Fonts are immutable after loading. The system is owned by the application
/// and passed to the text renderer each frame so new glyphs can be rasterized
/// on demand.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    ///
    /// Returns the `FontId` that identifies the font in draw commands.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    /// Returns a reference to the underlying `fontdue::Font`, if `id` is valid.
    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Family name reported by the font file, for diagnostics.
    pub fn name(&self, id: FontId) -> Option<&str> {
        self.get(id).and_then(|f| f.name())
    }

    /// Size of the single-line box of `text`: advance width × line height.
    ///
    /// Layout runs at the same physical raster size the renderer uses
    /// ([`raster_px`]) and is divided back by `scale`, so centering computed
    /// from this box matches the glyph positions on screen. Returned in
    /// logical pixels.
    #[must_use]
    pub fn measure_line(&self, text: &str, id: FontId, size: f32, scale: f32) -> Vec2 {
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, size * 1.2);
        };

        let scale = scale.max(0.01);
        let px = raster_px(size, scale);

        let line_height = font
            .horizontal_line_metrics(px)
            .map_or(px * 1.2, |m| m.new_line_size);

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, px, 0));

        // Pen position after each glyph rather than the bitmap's right edge,
        // so trailing side bearings count toward the box like a text engine would.
        let width = layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, px);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);

        Vec2::new(width / scale, line_height / scale)
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_px_snaps_to_quarter_pixels() {
        assert_eq!(raster_px(10.0, 1.0), 10.0);
        assert_eq!(raster_px(10.0, 1.01), 10.0);
        assert_eq!(raster_px(10.0, 1.03), 10.25);
        assert_eq!(raster_px(13.333, 2.0), 26.75);
    }

    #[test]
    fn raster_px_has_a_floor() {
        assert_eq!(raster_px(0.0, 1.0), 1.0);
        assert_eq!(raster_px(10.0, 0.0), 1.0);
    }

    #[test]
    fn unknown_font_measures_empty_line() {
        let fonts = FontSystem::new();
        let m = fonts.measure_line("12", FontId::new(3), 10.0, 1.0);
        assert_eq!(m.x, 0.0);
        assert!((m.y - 12.0).abs() < 1e-4);
        assert_eq!(fonts.name(FontId::new(3)), None);
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_font(b"definitely not a font").unwrap_err();
        assert!(err.to_string().starts_with("font load error"));
    }
}
