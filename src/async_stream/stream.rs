//! Async stream adapter for line chunking.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use linefold::{chunk_lines_async, aggregate_at, ScanConfig, StatTable};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<StatTable, linefold::AggregateError> {
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

use std::collections::VecDeque;
use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::chunk::LineChunk;
use crate::chunker::LineChunker;
use crate::config::ScanConfig;
use crate::error::AggregateError;

pin_project! {
    /// A stream that yields line-aligned chunks from an async reader.
    ///
    /// Blocks are filled to `chunk_size` across as many reads as it takes,
    /// so the chunks match what [`crate::LineChunkIter`] yields for the same
    /// bytes and block size.
    pub struct LineChunkStream<R> {
        #[pin]
        reader: R,
        engine: LineChunker,
        buffer: BytesMut,
        filled: usize,
        chunk_size: usize,
        ready: VecDeque<LineChunk>,
        finished: bool,
    }
}

impl<R> LineChunkStream<R> {
    /// Creates a stream reading `chunk_size` bytes per block.
    ///
    /// A `chunk_size` of zero is treated as one.
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            engine: LineChunker::new(),
            buffer: BytesMut::new(),
            filled: 0,
            chunk_size: chunk_size.max(1),
            ready: VecDeque::with_capacity(2),
            finished: false,
        }
    }

    /// Returns the number of bytes emitted so far.
    pub fn offset(&self) -> u64 {
        self.engine.offset()
    }
}

/// Cuts the filled part of the buffer off as a block.
fn take_block(buffer: &mut BytesMut, filled: &mut usize) -> Option<Bytes> {
    buffer.truncate(*filled);
    *filled = 0;
    (!buffer.is_empty()).then(|| buffer.split().freeze())
}

impl<R: AsyncRead> Stream for LineChunkStream<R> {
    type Item = Result<LineChunk, AggregateError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(chunk) = this.ready.pop_front() {
                return Poll::Ready(Some(Ok(chunk)));
            }
            if *this.finished {
                return Poll::Ready(None);
            }

            if this.buffer.is_empty() {
                this.buffer.reserve(*this.chunk_size);
                this.buffer.resize(*this.chunk_size, 0);
            }

            let read = this
                .reader
                .as_mut()
                .poll_read(cx, &mut this.buffer[*this.filled..]);

            match read {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    this.buffer.clear();
                    *this.filled = 0;
                    return Poll::Ready(Some(Err(e.into())));
                }
                Poll::Ready(Ok(0)) => {
                    if let Some(block) = take_block(this.buffer, this.filled) {
                        this.ready.extend(this.engine.push(block));
                    }
                    this.ready.extend(this.engine.finish());
                    *this.finished = true;
                }
                Poll::Ready(Ok(n)) => {
                    *this.filled += n;
                    if *this.filled == *this.chunk_size {
                        if let Some(block) = take_block(this.buffer, this.filled) {
                            this.ready.extend(this.engine.push(block));
                        }
                    }
                }
            }
        }
    }
}

/// Creates a line chunk stream from an async reader using
/// `config.chunk_size()`.
///
/// Uses `futures_io::AsyncRead`, so any runtime works. Tokio readers can be
/// adapted with `tokio_util::compat::TokioAsyncReadCompatExt`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use linefold::{chunk_lines_async, ScanConfig};
///
/// let file = tokio::fs::File::open("measurements.txt").await?;
/// let stream = chunk_lines_async(file.compat(), &ScanConfig::default());
/// ```
pub fn chunk_lines_async<R: AsyncRead>(reader: R, config: &ScanConfig) -> LineChunkStream<R> {
    LineChunkStream::new(reader, config.chunk_size())
}
