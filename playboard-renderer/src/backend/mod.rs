//! Surface backends that ship with the renderer.

pub mod recording;

pub use recording::{DrawOp, RecordingSurface};
