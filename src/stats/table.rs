//! The per-unit statistics table.

use ahash::AHashMap;

use super::StatEntry;
use crate::fixed::Tenths;

/// Initial capacity; typical inputs have a few hundred to ten thousand names.
const INITIAL_CAPACITY: usize = 1024;

/// A map from name bytes to their [`StatEntry`].
///
/// Names are raw bytes and compared byte for byte; no decoding or case
/// folding happens. Each parsing unit owns one table and hands it to the
/// merge step when done.
///
/// # Example
///
/// ```
/// use linefold::{StatTable, Tenths};
///
/// let mut table = StatTable::new();
/// table.record(b"Halifax", Tenths::new(30));
/// table.record(b"Halifax", Tenths::new(10));
///
/// let entry = table.get(b"Halifax").unwrap();
/// assert_eq!(entry.count(), 2);
/// assert_eq!(entry.mean(), Tenths::new(20));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatTable {
    entries: AHashMap<Box<[u8]>, StatEntry>,
}

impl StatTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: AHashMap::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Records one observation for `name`.
    ///
    /// The name is only copied the first time it is seen.
    #[inline]
    pub fn record(&mut self, name: &[u8], value: Tenths) {
        match self.entries.get_mut(name) {
            Some(entry) => entry.record(value),
            None => {
                self.entries.insert(name.into(), StatEntry::new(value));
            }
        }
    }

    /// Returns the entry for `name`, if any.
    pub fn get(&self, name: &[u8]) -> Option<&StatEntry> {
        self.entries.get(name)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no name has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of observations across all names.
    pub fn total_count(&self) -> u64 {
        self.entries.values().map(StatEntry::count).sum()
    }

    /// Iterates entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &StatEntry)> {
        self.entries.iter().map(|(k, v)| (&**k, v))
    }

    /// Entries sorted by name, byte-wise.
    pub fn sorted(&self) -> Vec<(&[u8], &StatEntry)> {
        let mut out: Vec<_> = self.iter().collect();
        out.sort_unstable_by(|a, b| a.0.cmp(b.0));
        out
    }

    /// Consumes the table, returning entries sorted by name.
    pub fn into_sorted(self) -> Vec<(Box<[u8]>, StatEntry)> {
        let mut out: Vec<_> = self.entries.into_iter().collect();
        out.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub(super) fn entries_mut(&mut self) -> &mut AHashMap<Box<[u8]>, StatEntry> {
        &mut self.entries
    }

    pub(super) fn into_entries(self) -> AHashMap<Box<[u8]>, StatEntry> {
        self.entries
    }
}

impl<N: AsRef<[u8]>> FromIterator<(N, Tenths)> for StatTable {
    fn from_iter<I: IntoIterator<Item = (N, Tenths)>>(iter: I) -> Self {
        let mut table = StatTable::new();
        table.extend(iter);
        table
    }
}

impl<N: AsRef<[u8]>> Extend<(N, Tenths)> for StatTable {
    fn extend<I: IntoIterator<Item = (N, Tenths)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.record(name.as_ref(), value);
        }
    }
}
