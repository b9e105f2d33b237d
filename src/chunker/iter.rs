//! Reader adapter - LineChunkIter over any [`std::io::Read`].
//!
//! # Example
//!
//! ```
//! use linefold::{chunk_lines, ScanConfig};
//! use std::io::Cursor;
//!
//! let config = ScanConfig::default().with_chunk_size(8);
//! let chunks: Vec<_> = chunk_lines(Cursor::new(&b"foo;1.0\nbar;2.0\n"[..]), &config)
//!     .collect::<Result<_, _>>()?;
//!
//! let total: usize = chunks.iter().map(|c| c.len()).sum();
//! assert_eq!(total, 16);
//! # Ok::<(), linefold::AggregateError>(())
//! ```

use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use bytes::{Bytes, BytesMut};

use super::LineChunker;
use crate::chunk::LineChunk;
use crate::config::ScanConfig;
use crate::error::AggregateError;

/// An iterator that yields line-aligned chunks from a reader.
///
/// Reads blocks of `chunk_size` bytes (short only at end of input) into a
/// reusable buffer and splits each with a [`LineChunker`]. Chunks borrow
/// the block they came from; once every chunk of a block is dropped the
/// allocation is reused for a later read.
pub struct LineChunkIter<R> {
    reader: R,
    engine: LineChunker,
    buffer: BytesMut,
    chunk_size: usize,
    ready: VecDeque<LineChunk>,
    finished: bool,
}

impl<R: Read> LineChunkIter<R> {
    /// Creates an iterator reading `chunk_size` bytes at a time.
    ///
    /// A `chunk_size` of zero is treated as one.
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            engine: LineChunker::new(),
            buffer: BytesMut::new(),
            chunk_size: chunk_size.max(1),
            ready: VecDeque::with_capacity(2),
            finished: false,
        }
    }

    /// Returns the number of bytes emitted so far.
    pub fn offset(&self) -> u64 {
        self.engine.offset()
    }

    /// Reads one block, or `None` at end of input.
    fn read_block(&mut self) -> std::io::Result<Option<Bytes>> {
        self.buffer.reserve(self.chunk_size);
        self.buffer.resize(self.chunk_size, 0);

        let mut filled = 0;
        while filled < self.chunk_size {
            match self.reader.read(&mut self.buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.buffer.clear();
                    return Err(e);
                }
            }
        }

        self.buffer.truncate(filled);
        if filled == 0 {
            return Ok(None);
        }
        Ok(Some(self.buffer.split().freeze()))
    }
}

impl<R: Read> Iterator for LineChunkIter<R> {
    type Item = Result<LineChunk, AggregateError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(chunk) = self.ready.pop_front() {
                return Some(Ok(chunk));
            }
            if self.finished {
                return None;
            }

            match self.read_block() {
                Ok(Some(block)) => self.ready.extend(self.engine.push(block)),
                Ok(None) => {
                    self.finished = true;
                    return self.engine.finish().map(Ok);
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

/// Creates a line chunk iterator over `reader` using `config.chunk_size()`.
pub fn chunk_lines<R: Read>(reader: R, config: &ScanConfig) -> LineChunkIter<R> {
    LineChunkIter::new(reader, config.chunk_size())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// Returns at most `step` bytes per read, with an interruption first.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
        interrupted: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(ErrorKind::Interrupted, "again"));
            }
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_empty_reader() {
        let mut iter = LineChunkIter::new(Cursor::new(Vec::new()), 16);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_reads_full_blocks_from_short_reads() {
        let input = b"foo;1.0\nbar;2.0\nbaz;3.0\n";
        let reader = Trickle {
            data: input,
            step: 3,
            interrupted: false,
        };
        let chunks: Vec<_> = LineChunkIter::new(reader, 16)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        // First block "foo;1.0\nbar;2.0\n" comes out in one piece
        assert_eq!(&chunks[0].data[..], b"foo;1.0\nbar;2.0\n");
        let total: usize = chunks.iter().map(LineChunk::len).sum();
        assert_eq!(total, input.len());
    }

    #[test]
    fn test_every_chunk_size_preserves_input() {
        let input = b"foo;1.0\nbar;2.0\nbaz;3.0";
        for size in 1..=input.len() + 1 {
            let chunks: Vec<_> = LineChunkIter::new(Cursor::new(&input[..]), size)
                .collect::<Result<Vec<_>, _>>()
                .unwrap();
            let joined: Vec<u8> = chunks.iter().flat_map(|c| c.data.to_vec()).collect();
            assert_eq!(&joined[..], &input[..], "chunk size {}", size);
        }
    }

    #[test]
    fn test_io_error_ends_iteration() {
        let mut iter = LineChunkIter::new(Failing, 16);
        assert!(matches!(iter.next(), Some(Err(AggregateError::Io(_)))));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        let chunks: Vec<_> = LineChunkIter::new(Cursor::new(&b"a;1.0\n"[..]), 0)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(chunks.len(), 1);
    }
}
