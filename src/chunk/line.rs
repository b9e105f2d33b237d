//! The LineChunk type - a run of whole lines.

use bytes::Bytes;
use std::fmt;

/// A read-only run of whole lines from the source, with its position.
///
/// `data` starts right after a newline (or at the start of input) and ends
/// with a newline (or at the end of input). It is usually a slice sharing
/// the producer's read buffer, so cloning or sending it never copies bytes.
///
/// # Example
///
/// ```
/// use linefold::LineChunk;
/// use bytes::Bytes;
///
/// let chunk = LineChunk::new(Bytes::from_static(b"a;1.0\nb;2.0\n"), 100);
/// assert_eq!(chunk.len(), 12);
/// assert_eq!(chunk.range(), 100..112);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChunk {
    /// The line bytes.
    pub data: Bytes,

    /// Offset of `data[0]` in the source stream.
    pub offset: u64,
}

impl LineChunk {
    /// Creates a chunk at the given stream offset.
    pub fn new(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            data: data.into(),
            offset,
        }
    }

    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the start offset.
    pub fn start(&self) -> u64 {
        self.offset
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the chunk as a range.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.start()..self.end()
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl AsRef<[u8]> for LineChunk {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for LineChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineChunk({} bytes @ {})", self.len(), self.offset)
    }
}
