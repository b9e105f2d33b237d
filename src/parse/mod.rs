//! Record parser and per-chunk aggregator.
//!
//! Input to [`aggregate`] must contain whole lines only: no leading partial
//! line, no trailing partial line except an unterminated final record at
//! the true end of input. The chunker and the segment scan both guarantee
//! this before handing bytes over.

use memchr::memchr;

use crate::error::{AggregateError, FormatReason, Result};
use crate::fixed::parse_tenths;
use crate::stats::StatTable;

/// Parses every `name;value` line in `chunk` into a fresh table.
///
/// Equivalent to [`aggregate_at`] with a base offset of zero.
///
/// # Example
///
/// ```
/// use linefold::{aggregate, Tenths};
///
/// let table = aggregate(b"Halifax;3.0\nHalifax;1.0\n")?;
/// assert_eq!(table.get(b"Halifax").unwrap().mean(), Tenths::new(20));
/// # Ok::<(), linefold::AggregateError>(())
/// ```
pub fn aggregate(chunk: &[u8]) -> Result<StatTable> {
    aggregate_at(chunk, 0)
}

/// Parses every line in `chunk`, reporting error offsets relative to
/// `base`, the position of `chunk[0]` in the source.
///
/// An empty chunk yields an empty table. Any malformed line fails the
/// whole chunk and its partial table is dropped.
pub fn aggregate_at(chunk: &[u8], base: u64) -> Result<StatTable> {
    let mut table = StatTable::new();
    let mut pos = 0usize;

    while pos < chunk.len() {
        let rest = &chunk[pos..];
        let line_len = memchr(b'\n', rest).unwrap_or(rest.len());
        let line = &rest[..line_len];
        let at = base + pos as u64;

        if line.is_empty() {
            return Err(AggregateError::format(at, FormatReason::EmptyLine));
        }

        let sep = memchr(b';', line)
            .ok_or_else(|| AggregateError::format(at, FormatReason::MissingSeparator))?;
        let (name, value) = (&line[..sep], &line[sep + 1..]);

        if value.is_empty() {
            return Err(AggregateError::format(at, FormatReason::EmptyValue));
        }
        let value = parse_tenths(value)
            .map_err(|_| AggregateError::format(at, FormatReason::InvalidValue))?;

        table.record(name, value);
        pos += line_len + 1;
    }

    Ok(table)
}
