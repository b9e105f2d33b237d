//! The statistics kept for a single name.

use crate::fixed::{Tenths, div_round};

/// Running min / max / sum / count for one name.
///
/// All fields stay in the scaled-integer domain. `count` is at least one
/// once an entry exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatEntry {
    min: Tenths,
    max: Tenths,
    sum: i128,
    count: u64,
}

impl StatEntry {
    /// Creates an entry from its first observation.
    pub fn new(value: Tenths) -> Self {
        Self {
            min: value,
            max: value,
            sum: i128::from(value.raw()),
            count: 1,
        }
    }

    /// Folds one more observation in.
    #[inline]
    pub fn record(&mut self, value: Tenths) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += i128::from(value.raw());
        self.count += 1;
    }

    /// Combines another entry for the same name into this one.
    #[inline]
    pub fn merge(&mut self, other: &StatEntry) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Smallest value seen.
    pub fn min(&self) -> Tenths {
        self.min
    }

    /// Largest value seen.
    pub fn max(&self) -> Tenths {
        self.max
    }

    /// Sum of all values, in tenths.
    pub fn sum(&self) -> i128 {
        self.sum
    }

    /// Number of values seen.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean rounded half away from zero to one decimal.
    pub fn mean(&self) -> Tenths {
        Tenths::new(div_round(self.sum, self.count))
    }
}
