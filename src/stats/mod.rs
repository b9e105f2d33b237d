//! Per-name statistics and their merge.
//!
//! - [`StatEntry`] - min / max / sum / count for one name
//! - [`StatTable`] - Owned map from name bytes to [`StatEntry`]
//! - [`merge`] - Commutative, associative combination of two tables

mod entry;
mod merge;
mod table;

pub use entry::StatEntry;
pub use merge::merge;
pub use table::StatTable;
