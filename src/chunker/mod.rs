//! Line-boundary chunking of byte streams.
//!
//! - [`LineChunker`] - Stateful splitter with `push()`/`finish()` API
//! - [`LineChunkIter`] - Iterator that yields line chunks from a [`std::io::Read`] source

mod engine;
mod iter;

pub use engine::LineChunker;
pub use iter::{LineChunkIter, chunk_lines};
