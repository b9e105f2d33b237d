//! Atomic segment claiming and line-boundary fix-up.

use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use memchr::memchr;

/// Process-wide claim counter over the input's byte length.
///
/// Each [`claim`](SegmentCursor::claim) is a single `fetch_add`, so no two
/// callers ever receive overlapping ranges.
#[derive(Debug, Default)]
pub struct SegmentCursor {
    next: AtomicU64,
}

impl SegmentCursor {
    /// Creates a cursor at offset zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `[offset, offset + size)` and returns `offset`.
    ///
    /// The caller stops once the returned offset reaches the input length.
    #[inline]
    pub fn claim(&self, size: u64) -> u64 {
        self.next.fetch_add(size, Ordering::SeqCst)
    }

    /// Offset the next claim will start at.
    pub fn position(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

/// Snaps the claim `[offset, offset + size)` over `data` to whole lines.
///
/// - A claim that does not start at a line start skips forward past the
///   first newline inside the claim; that partial line belongs to the
///   previous claim.
/// - A claim that does not end on a newline extends to the next newline
///   (inclusive) or to the end of `data`.
///
/// Returns `None` when the claim is empty, past the end of `data` or holds
/// no line start. Over all claims of a cursor, every line is returned exactly
/// once.
///
/// # Example
///
/// ```
/// use linefold::align_segment;
///
/// let data = b"foo;1.0\nbar;2.0\nbaz;3.0\n";
/// assert_eq!(align_segment(data, 0, 4), Some(0..8));
/// assert_eq!(align_segment(data, 4, 4), None);
/// assert_eq!(align_segment(data, 8, 4), Some(8..16));
/// ```
pub fn align_segment(data: &[u8], offset: usize, size: usize) -> Option<Range<usize>> {
    let len = data.len();
    if size == 0 || offset >= len {
        return None;
    }
    let claimed_end = offset.saturating_add(size).min(len);

    let mut start = offset;
    if start != 0 && data[start - 1] != b'\n' {
        let nl = memchr(b'\n', &data[start..claimed_end])?;
        start += nl + 1;
    }

    let mut end = claimed_end;
    if data[end - 1] != b'\n' {
        end = memchr(b'\n', &data[end..]).map_or(len, |nl| end + nl + 1);
    }

    (start < end).then_some(start..end)
}
