//! linefold
//!
//! Parallel min / mean / max aggregation of huge `name;value` line files.
//!
//! Each line holds a station name and a reading with one fractional digit:
//!
//! ```text
//! Hamburg;12.0
//! Bulawayo;8.9
//! Hamburg;-3.4
//! ```
//!
//! `linefold` reads every record once and produces one summary line,
//! `{Bulawayo=8.9/8.9/8.9, Hamburg=-3.4/4.3/12.0}`, with names in byte order.
//! Values are parsed into fixed-point tenths, so the result does not depend
//! on how the input was split or in which order partial tables merged.
//!
//! Two execution modes share the parser, the merge and the formatter:
//!
//! - **streaming** ([`run_streaming`]) - one reader thread splits blocks on
//!   line boundaries, a worker pool parses them, the caller merges.
//! - **mapped** ([`run_mapped_file`]) - the file is mapped read-only and
//!   workers claim fixed-size segments from a shared atomic cursor.
//!
//! [`run`] picks between them.
//!
//! # Example
//!
//! ```
//! use linefold::{run_streaming, format_summary, ScanConfig};
//! use std::io::Cursor;
//!
//! let input = Cursor::new(&b"Hamburg;12.0\nBulawayo;8.9\nHamburg;-3.4\n"[..]);
//! let table = run_streaming(input, &ScanConfig::default().with_workers(2))?;
//!
//! assert_eq!(
//!     format_summary(&table),
//!     "{Bulawayo=8.9/8.9/8.9, Hamburg=-3.4/4.3/12.0}"
//! );
//! # Ok::<(), linefold::AggregateError>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use linefold::{aggregate_at, chunk_lines_async, ScanConfig, StatTable};
//!
//! async fn demo<R: futures_io::AsyncRead + Unpin>(reader: R) -> linefold::Result<StatTable> {
//!     let mut stream = chunk_lines_async(reader, &ScanConfig::default());
//!     let mut total = StatTable::new();
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         total.merge(aggregate_at(&chunk.data, chunk.offset)?);
//!     }
//!     Ok(total)
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod chunker;
mod config;
mod error;
mod fixed;
mod format;
mod mapped;
mod parse;
mod pipeline;
mod source;
mod stats;

#[cfg(feature = "async-io")]
mod async_stream;

pub use chunk::LineChunk;
pub use chunker::{LineChunkIter, LineChunker, chunk_lines};
pub use config::{ScanConfig, ScanMode};
pub use error::{AggregateError, FormatReason, Result};
pub use fixed::{FixedError, Tenths, parse_tenths};
pub use format::{Summary, format_summary};
pub use mapped::{SegmentCursor, align_segment, run_mapped_file, scan_segments};
pub use parse::{aggregate, aggregate_at};
pub use pipeline::run_streaming;
pub use source::{Input, run};
pub use stats::{StatEntry, StatTable, merge};

#[cfg(feature = "async-io")]
pub use async_stream::{LineChunkStream, chunk_lines_async};
