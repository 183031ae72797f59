//! Paint model shared between the clock and the renderers.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - strokes (width + color) for outlines and line segments
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod stroke;

pub use color::Color;
pub use stroke::Stroke;
