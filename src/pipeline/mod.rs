//! Streaming pipeline: one reader, a pool of parsers, one merger.
//!
//! - [`run_streaming`] - Aggregate any [`std::io::Read`] source
//!
//! ```text
//! ┌──────────────┐  chunk queue  ┌──────────────┐  result queue  ┌──────────────┐
//! │  producer    │──────────────>│  N workers   │───────────────>│  collector   │
//! │ (LineChunker)│   (bounded)   │ (aggregate)  │   (bounded)    │   (merge)    │
//! └──────────────┘               └──────────────┘                └──────────────┘
//! ```

mod collector;
mod stream;

pub(crate) use collector::{CancelFlag, collect, join_workers};
pub use stream::run_streaming;
