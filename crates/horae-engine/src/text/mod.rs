//! Font loading and measurement.
//!
//! Fonts are parsed once by [`FontSystem`] and referenced from draw commands
//! by [`FontId`]. Glyph rasterization lives in `render::shapes::text`.

mod font_system;

pub use font_system::{raster_px, FontId, FontLoadError, FontSystem};
