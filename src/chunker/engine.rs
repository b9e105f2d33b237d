//! Core chunking engine - LineChunker with a streaming push/finish API.
//!
//! The engine turns arbitrary blocks of bytes into runs of whole lines:
//!
//! - `push()` - Feed a block of any size (1 byte, 64 KiB, 64 MiB)
//! - `finish()` - Flush the unterminated final line when the stream ends
//!
//! # Example
//!
//! ```
//! use linefold::LineChunker;
//! use bytes::Bytes;
//!
//! let mut chunker = LineChunker::new();
//!
//! let first = chunker.push(Bytes::from_static(b"foo;1.0\nba"));
//! let second = chunker.push(Bytes::from_static(b"r;2.0\nbaz;3.0"));
//! let last = chunker.finish();
//!
//! assert_eq!(&first[0].data[..], b"foo;1.0\n");
//! assert_eq!(&second[0].data[..], b"bar;2.0\n");
//! assert_eq!(&last.unwrap().data[..], b"baz;3.0");
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use memchr::{memchr, memrchr};

use crate::chunk::LineChunk;

/// A stateful splitter from byte blocks to line-aligned chunks.
///
/// The only state carried between calls is the remainder: the bytes after
/// the last newline seen so far. It is held as a slice of the block it came
/// from until a block with no newline at all arrives; from then on it grows
/// in one owned buffer that is frozen when the line finally ends.
///
/// # Zero-Copy
///
/// For each pushed block, everything between its first and last newline is
/// emitted as a slice of the block. The one copy is the line straddling
/// two or more blocks, and each of its bytes is copied once.
///
/// # Output per push
///
/// At most two chunks: the rebuilt straddling line, then the rest of the
/// block up to and including its last newline. A block with no newline at
/// all emits nothing and is appended to the remainder, so lines longer than
/// the block size still come out whole.
#[derive(Debug, Default)]
pub struct LineChunker {
    pending: Remainder,
    offset: u64,
}

/// Bytes after the last newline.
#[derive(Debug, Default)]
enum Remainder {
    #[default]
    Empty,
    /// Tail of the last block, not copied.
    Slice(Bytes),
    /// A line spanning several blocks, copied as it arrives.
    Growing(BytesMut),
}

impl Remainder {
    fn len(&self) -> usize {
        match self {
            Remainder::Empty => 0,
            Remainder::Slice(b) => b.len(),
            Remainder::Growing(b) => b.len(),
        }
    }

    /// Appends a block that holds no newline.
    fn extend(self, data: Bytes) -> Self {
        match self {
            Remainder::Empty => Remainder::Slice(data),
            Remainder::Slice(head) => {
                let mut line = BytesMut::with_capacity((head.len() + data.len()) * 2);
                line.put_slice(&head);
                line.put_slice(&data);
                Remainder::Growing(line)
            }
            Remainder::Growing(mut line) => {
                line.put_slice(&data);
                Remainder::Growing(line)
            }
        }
    }

    /// Completes the remainder with `head`, which ends in a newline.
    fn close(self, head: &[u8]) -> Bytes {
        match self {
            Remainder::Empty => Bytes::copy_from_slice(head),
            Remainder::Slice(pending) => join_line(&pending, head),
            Remainder::Growing(mut line) => {
                line.put_slice(head);
                line.freeze()
            }
        }
    }

    fn into_bytes(self) -> Option<Bytes> {
        match self {
            Remainder::Empty => None,
            Remainder::Slice(b) => Some(b),
            Remainder::Growing(b) => Some(b.freeze()),
        }
        .filter(|b| !b.is_empty())
    }
}

impl LineChunker {
    /// Creates a chunker at stream offset zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes the next block of the stream and returns the complete lines
    /// it closes.
    pub fn push(&mut self, data: Bytes) -> Vec<LineChunk> {
        let mut chunks = Vec::with_capacity(2);
        if data.is_empty() {
            return chunks;
        }

        let Some(last_nl) = memrchr(b'\n', &data) else {
            // No line ends in this block
            self.pending = std::mem::take(&mut self.pending).extend(data);
            return chunks;
        };

        let readable = data.slice(..=last_nl);
        let tail = data.slice(last_nl + 1..);

        let body = match std::mem::take(&mut self.pending) {
            Remainder::Empty => readable,
            pending => {
                // readable ends with '\n', so a first newline exists
                let first_nl = memchr(b'\n', &readable).unwrap_or(last_nl);
                let line = pending.close(&readable[..=first_nl]);
                chunks.push(self.emit(line));
                readable.slice(first_nl + 1..)
            }
        };

        if !body.is_empty() {
            chunks.push(self.emit(body));
        }

        if !tail.is_empty() {
            self.pending = Remainder::Slice(tail);
        }
        chunks
    }

    /// Finalizes the stream and returns the unterminated last line, if any.
    ///
    /// After calling `finish()` the chunker can be reused for a new stream
    /// once [`LineChunker::reset`] is called.
    pub fn finish(&mut self) -> Option<LineChunk> {
        let line = std::mem::take(&mut self.pending).into_bytes()?;
        Some(self.emit(line))
    }

    /// Resets the chunker state for a new stream.
    pub fn reset(&mut self) {
        self.pending = Remainder::Empty;
        self.offset = 0;
    }

    /// Returns the stream offset of the next chunk to be emitted.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of remainder bytes waiting for a newline.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn emit(&mut self, data: Bytes) -> LineChunk {
        let chunk = LineChunk::new(data, self.offset);
        self.offset += chunk.len() as u64;
        chunk
    }
}

/// Copies the remainder and the head of the next block into one line.
fn join_line(pending: &[u8], head: &[u8]) -> Bytes {
    let mut line = BytesMut::with_capacity(pending.len() + head.len());
    line.put_slice(pending);
    line.put_slice(head);
    line.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(input: &[u8], block: usize) -> Vec<LineChunk> {
        let data = Bytes::copy_from_slice(input);
        let mut chunker = LineChunker::new();
        let mut out = Vec::new();
        let mut start = 0;
        while start < data.len() {
            let end = (start + block).min(data.len());
            out.extend(chunker.push(data.slice(start..end)));
            start = end;
        }
        out.extend(chunker.finish());
        out
    }

    #[test]
    fn test_empty_push() {
        let mut chunker = LineChunker::new();
        assert!(chunker.push(Bytes::new()).is_empty());
        assert!(chunker.finish().is_none());
    }

    #[test]
    fn test_exact_line() {
        let mut chunker = LineChunker::new();
        let chunks = chunker.push(Bytes::from_static(b"foo\n"));
        assert_eq!(chunks.len(), 1);
        assert_eq!(&chunks[0].data[..], b"foo\n");
        assert_eq!(chunker.pending_len(), 0);
    }

    #[test]
    fn test_split_line() {
        let mut chunker = LineChunker::new();
        let chunks = chunker.push(Bytes::from_static(b"foo\nb"));
        assert_eq!(chunks.len(), 1);
        assert_eq!(&chunks[0].data[..], b"foo\n");
        assert_eq!(chunker.pending_len(), 1);

        let chunks = chunker.push(Bytes::from_static(b"ar\nbaz\n"));
        assert_eq!(chunks.len(), 2);
        assert_eq!(&chunks[0].data[..], b"bar\n");
        assert_eq!(chunks[0].offset, 4);
        assert_eq!(&chunks[1].data[..], b"baz\n");
        assert_eq!(chunks[1].offset, 8);
    }

    #[test]
    fn test_body_shares_block_memory() {
        let block = Bytes::from_static(b"a\nb\nc");
        let mut chunker = LineChunker::new();
        let chunks = chunker.push(block.clone());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].data.as_ptr(), block.as_ptr());
    }

    #[test]
    fn test_line_longer_than_block() {
        let input = b"a-very-long-name;12.3\nb;1.0\n";
        for block in 1..=input.len() {
            let chunks = feed(input, block);
            let joined: Vec<u8> = chunks.iter().flat_map(|c| c.data.iter().copied()).collect();
            assert_eq!(&joined[..], &input[..], "block size {}", block);
            for chunk in &chunks {
                assert_eq!(chunk.data.last(), Some(&b'\n'), "block size {}", block);
            }
        }
    }

    #[test]
    fn test_long_line_grows_in_place() {
        let mut chunker = LineChunker::new();
        let first = Bytes::from_static(b"abc");
        assert!(chunker.push(first.clone()).is_empty());
        // a single newline-free block stays a slice
        assert!(matches!(&chunker.pending, Remainder::Slice(b) if b.as_ptr() == first.as_ptr()));

        for _ in 0..100 {
            assert!(chunker.push(Bytes::from_static(b"x")).is_empty());
        }
        assert!(matches!(chunker.pending, Remainder::Growing(_)));
        assert_eq!(chunker.pending_len(), 103);

        let chunks = chunker.push(Bytes::from_static(b"y;1.0\nz;2.0\n"));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 103 + 6);
        assert!(chunks[0].data.starts_with(b"abcxxx"));
        assert!(chunks[0].data.ends_with(b"xy;1.0\n"));
        assert_eq!(&chunks[1].data[..], b"z;2.0\n");
        assert_eq!(chunks[1].offset, 109);
        assert_eq!(chunker.pending_len(), 0);
    }

    #[test]
    fn test_long_unterminated_line_at_finish() {
        let mut chunker = LineChunker::new();
        for block in [&b"Hali"[..], b"fax;", b"3.0"] {
            assert!(chunker.push(Bytes::from_static(block)).is_empty());
        }
        let last = chunker.finish().unwrap();
        assert_eq!(&last.data[..], b"Halifax;3.0");
        assert!(chunker.finish().is_none());
    }

    #[test]
    fn test_unterminated_final_line() {
        let chunks = feed(b"Halifax;3.0", 4);
        assert_eq!(chunks.len(), 1);
        assert_eq!(&chunks[0].data[..], b"Halifax;3.0");
    }

    #[test]
    fn test_offsets_are_contiguous() {
        let input = b"foo;1.0\nbar;2.0\nbaz;3.0\nq";
        for block in 1..=input.len() {
            let mut expected = 0u64;
            for chunk in feed(input, block) {
                assert_eq!(chunk.offset, expected);
                expected = chunk.end();
            }
            assert_eq!(expected, input.len() as u64);
        }
    }

    #[test]
    fn test_reset() {
        let mut chunker = LineChunker::new();
        let _ = chunker.push(Bytes::from_static(b"abc\nde"));
        assert!(chunker.offset() > 0);
        chunker.reset();
        assert_eq!(chunker.offset(), 0);
        assert_eq!(chunker.pending_len(), 0);
        assert!(chunker.finish().is_none());
    }
}
