//! Horae engine crate.
//!
//! Platform + GPU runtime for the clock: a winit window, a wgpu surface, a
//! renderer-agnostic draw stream and the shape renderers that consume it.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
