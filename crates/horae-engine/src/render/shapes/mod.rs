//! Shape renderers.
//!
//! Every renderer follows the same frame protocol, driven by
//! [`SceneRenderer`](super::SceneRenderer):
//! 1. `clear()` drops last frame's instances
//! 2. `push(cmd)` converts one command into GPU instances and returns how many
//! 3. `upload(ctx)` lazily builds pipelines/buffers and writes instance data
//! 4. `draw(rpass, range)` issues one instanced draw for a range of instances

mod common;

pub mod circle;
pub mod line;
pub mod text;
