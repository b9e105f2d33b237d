//! Async line chunking.
//!
//! Works with any `futures-io::AsyncRead`, so tokio, async-std and smol
//! readers can all feed the same parser.
//!
//! - [`chunk_lines_async`] - Creates an async stream of line chunks from an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{LineChunkStream, chunk_lines_async};
