//! Merging partial tables.
//!
//! Both execution modes merge worker results in arrival order, which is
//! nondeterministic, so the merge must be commutative and associative.

use std::collections::hash_map::Entry;

use super::StatTable;

impl StatTable {
    /// Merges `other` into `self`, consuming it.
    ///
    /// Names missing from `self` are moved in without copying; names present
    /// in both are combined (min of mins, max of maxes, sums and counts
    /// added). The smaller table is folded into the larger one.
    pub fn merge(&mut self, other: StatTable) {
        let mut other = other;
        if other.len() > self.len() {
            std::mem::swap(self, &mut other);
        }

        let dst = self.entries_mut();
        for (name, src) in other.into_entries() {
            match dst.entry(name) {
                Entry::Occupied(mut slot) => slot.get_mut().merge(&src),
                Entry::Vacant(slot) => {
                    slot.insert(src);
                }
            }
        }
    }
}

/// Merges `src` into `dst` and returns the combined table.
///
/// # Example
///
/// ```
/// use linefold::{merge, StatTable, Tenths};
///
/// let a: StatTable = [("x", Tenths::new(1))].into_iter().collect();
/// let b: StatTable = [("x", Tenths::new(3)), ("y", Tenths::new(2))].into_iter().collect();
///
/// let both = merge(a, b);
/// assert_eq!(both.len(), 2);
/// assert_eq!(both.get(b"x").unwrap().count(), 2);
/// ```
pub fn merge(mut dst: StatTable, src: StatTable) -> StatTable {
    dst.merge(src);
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::Tenths;

    fn table(rows: &[(&str, i64)]) -> StatTable {
        rows.iter().map(|&(n, v)| (n, Tenths::new(v))).collect()
    }

    #[test]
    fn test_merge_into_empty() {
        let merged = merge(StatTable::new(), table(&[("a", 1), ("b", 2)]));
        assert_eq!(merged, table(&[("a", 1), ("b", 2)]));
    }

    #[test]
    fn test_merge_empty_source() {
        let merged = merge(table(&[("a", 1)]), StatTable::new());
        assert_eq!(merged, table(&[("a", 1)]));
    }

    #[test]
    fn test_merge_combines_shared_names() {
        let merged = merge(table(&[("a", 10), ("a", 30)]), table(&[("a", -20), ("b", 5)]));
        let a = merged.get(b"a").unwrap();
        assert_eq!(a.min(), Tenths::new(-20));
        assert_eq!(a.max(), Tenths::new(30));
        assert_eq!(a.sum(), 20);
        assert_eq!(a.count(), 3);
        assert_eq!(merged.get(b"b").unwrap().count(), 1);
    }

    #[test]
    fn test_merge_equals_single_pass() {
        let whole = table(&[("a", 1), ("b", 2), ("a", 3), ("c", -4), ("b", 5)]);
        let split = merge(
            table(&[("a", 1), ("b", 2)]),
            table(&[("a", 3), ("c", -4), ("b", 5)]),
        );
        assert_eq!(whole, split);
    }

    #[test]
    fn test_merge_commutative() {
        let x = table(&[("a", 1), ("b", 7)]);
        let y = table(&[("b", -3), ("c", 4), ("d", 0)]);
        assert_eq!(merge(x.clone(), y.clone()), merge(y, x));
    }

    #[test]
    fn test_merge_associative() {
        let x = table(&[("a", 1), ("b", 7)]);
        let y = table(&[("b", -3), ("c", 4)]);
        let z = table(&[("a", 9), ("c", -4)]);
        let left = merge(merge(x.clone(), y.clone()), z.clone());
        let right = merge(x, merge(y, z));
        assert_eq!(left, right);
    }
}
