//! Rendering of the final table.
//!
//! The summary line is `{name=min/mean/max, ...}` with names in byte order
//! and every number printed with exactly one fractional digit.

use std::fmt;
use std::io::{self, Write};

use crate::stats::{StatEntry, StatTable};

/// Display adapter for a [`StatTable`].
///
/// `Display` decodes names lossily as UTF-8. [`Summary::write_to`] writes
/// the name bytes untouched.
///
/// # Example
///
/// ```
/// use linefold::{Summary, StatTable, parse_tenths};
///
/// let mut table = StatTable::new();
/// table.record(b"Hamburg", parse_tenths(b"12.0")?);
/// table.record(b"Bulawayo", parse_tenths(b"8.9")?);
///
/// assert_eq!(
///     Summary(&table).to_string(),
///     "{Bulawayo=8.9/8.9/8.9, Hamburg=12.0/12.0/12.0}"
/// );
/// # Ok::<(), linefold::FixedError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a>(pub &'a StatTable);

impl Summary<'_> {
    /// Writes the summary and a trailing newline to `out`.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(b"{")?;
        for (i, (name, entry)) in self.0.sorted().into_iter().enumerate() {
            if i > 0 {
                out.write_all(b", ")?;
            }
            out.write_all(name)?;
            write!(out, "={}", Triple(entry))?;
        }
        out.write_all(b"}\n")?;
        out.flush()
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, entry)) in self.0.sorted().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", String::from_utf8_lossy(name), Triple(entry))?;
        }
        f.write_str("}")
    }
}

/// `min/mean/max` for one entry.
struct Triple<'a>(&'a StatEntry);

impl fmt::Display for Triple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.0.min(), self.0.mean(), self.0.max())
    }
}

/// Renders `table` as a single summary line without a trailing newline.
pub fn format_summary(table: &StatTable) -> String {
    Summary(table).to_string()
}
