//! Chunk types.
//!
//! - [`LineChunk`] - Line-aligned, zero-copy view into the source

mod line;

pub use line::LineChunk;
