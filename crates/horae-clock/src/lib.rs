//! Analog clock face.
//!
//! [`face::render_frame`] turns a sampled [`moment::Moment`] and a viewport
//! into a draw list; [`app::ClockApp`] hosts it in a horae-engine window.

pub mod app;
pub mod face;
pub mod fonts;
pub mod geometry;
pub mod moment;
pub mod painter;
pub mod style;
