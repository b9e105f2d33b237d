//! Segment scan over a memory-mapped file.
//!
//! - [`SegmentCursor`] - Shared atomic claim counter
//! - [`align_segment`] - Snaps a claimed range to line boundaries
//! - [`scan_segments`] - Worker pool over any in-memory byte slice
//! - [`run_mapped_file`] - Maps a file read-only and scans it
//!
//! There is no reader stage: workers claim fixed-size ranges from the
//! cursor and fix up their own line boundaries, touching only bytes inside
//! or just past their claim.

mod cursor;
mod scan;

pub use cursor::{SegmentCursor, align_segment};
pub use scan::{run_mapped_file, scan_segments};
