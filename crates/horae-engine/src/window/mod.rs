//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, wires them to the GPU
//! layer and turns the tick schedule into redraw requests.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
