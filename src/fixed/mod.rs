//! Fixed-point values with one fractional digit.
//!
//! - [`Tenths`] - A value scaled by ten, stored as an integer
//! - [`parse_tenths`] - Strict `-?digits[.digit]` parser
//!
//! All accumulation happens in this integer domain; decimal text only
//! appears at the edges (parsing a record, rendering the summary).

use std::fmt;

/// Error returned by [`parse_tenths`] for anything that is not
/// `-?digits[.digit]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedError;

impl fmt::Display for FixedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("not a one-decimal number")
    }
}

impl std::error::Error for FixedError {}

/// A decimal value multiplied by ten.
///
/// # Example
///
/// ```
/// use linefold::{parse_tenths, Tenths};
///
/// let t = parse_tenths(b"-12.3")?;
/// assert_eq!(t, Tenths::new(-123));
/// assert_eq!(t.to_string(), "-12.3");
/// # Ok::<(), linefold::FixedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tenths(i64);

impl Tenths {
    /// Zero.
    pub const ZERO: Tenths = Tenths(0);

    /// Wraps a raw scaled value.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw scaled value.
    pub const fn raw(self) -> i64 {
        self.0
    }
}

impl From<Tenths> for i64 {
    fn from(t: Tenths) -> Self {
        t.0
    }
}

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{}", sign, abs / 10, abs % 10)
    }
}

/// Parses `-?digits[.digit]` into tenths.
///
/// This is a digit shift, not a decimal parser: it folds each digit into an
/// accumulator, skips the single `.`, then reapplies the sign. A value with
/// no fractional part is scaled up (`7` is `7.0`). Multi-digit fractions,
/// exponents, a leading `+`, whitespace and overflow are all rejected.
pub fn parse_tenths(text: &[u8]) -> Result<Tenths, FixedError> {
    let (negative, digits) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, text),
    };

    let (int_part, frac) = match digits.iter().position(|&b| b == b'.') {
        Some(dot) => {
            let frac = &digits[dot + 1..];
            if frac.len() != 1 {
                return Err(FixedError);
            }
            (&digits[..dot], frac[0])
        }
        None => (digits, b'0'),
    };

    if int_part.is_empty() || !frac.is_ascii_digit() {
        return Err(FixedError);
    }

    let mut n: i64 = 0;
    for &b in int_part.iter().chain(std::iter::once(&frac)) {
        if !b.is_ascii_digit() {
            return Err(FixedError);
        }
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(i64::from(b - b'0')))
            .ok_or(FixedError)?;
    }

    Ok(Tenths(if negative { -n } else { n }))
}

/// Divides `sum` by `count` and rounds half away from zero.
///
/// Exact in integer arithmetic; `count` must be non-zero. The sum is
/// carried in `i128` so a run can never overflow it, while the mean of
/// `i64` values always fits back into `i64`.
pub(crate) fn div_round(sum: i128, count: u64) -> i64 {
    debug_assert!(count > 0);
    let count = u128::from(count);
    let abs = sum.unsigned_abs();
    let mut q = abs / count;
    if (abs % count) * 2 >= count {
        q += 1;
    }
    let q = q as i128;
    (if sum < 0 { -q } else { q }) as i64
}
