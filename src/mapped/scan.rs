//! Worker pool for the segment scan.

use std::fs::File;
use std::path::Path;
use std::thread;

use crossbeam_channel::{Sender, bounded};
use log::{debug, trace};
use memmap2::Mmap;

use super::{SegmentCursor, align_segment};
use crate::config::ScanConfig;
use crate::error::Result;
use crate::parse::aggregate_at;
use crate::pipeline::{CancelFlag, collect, join_workers};
use crate::stats::StatTable;

/// Aggregates `data` with `config.workers()` threads claiming
/// `config.segment_size()` byte segments from a shared cursor.
///
/// `data` is shared read-only between workers; each worker parses only its
/// own line-aligned segment into a private table, and the calling thread
/// merges the tables as they arrive.
///
/// # Example
///
/// ```
/// use linefold::{scan_segments, ScanConfig};
///
/// let config = ScanConfig::default().with_segment_size(3).with_workers(4);
/// let table = scan_segments(b"foo;1.0\nbar;2.0\nfoo;3.0\n", &config)?;
/// assert_eq!(table.get(b"foo").unwrap().count(), 2);
/// # Ok::<(), linefold::AggregateError>(())
/// ```
pub fn scan_segments(data: &[u8], config: &ScanConfig) -> Result<StatTable> {
    config.validate()?;
    let workers = config.workers();
    // Capped at the input length so the cursor cannot wrap.
    let segment_size = config.segment_size().min(data.len().max(1));
    debug!(
        "segment scan: {} bytes, {} workers, {} byte segments",
        data.len(),
        workers,
        segment_size
    );

    let cursor = SegmentCursor::new();
    let cancel = CancelFlag::new();
    let (result_tx, result_rx) = bounded::<Result<StatTable>>(config.result_queue_depth());

    let table = thread::scope(|s| {
        let cursor = &cursor;
        let cancel = &cancel;

        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let results = result_tx.clone();
                s.spawn(move || scan_worker(data, segment_size, cursor, results, cancel))
            })
            .collect();
        drop(result_tx);

        let merged = collect(result_rx, cancel);
        join_workers(merged, handles)
    })?;

    debug!(
        "segment scan done: {} names, {} records",
        table.len(),
        table.total_count()
    );
    Ok(table)
}

/// Claims and parses segments until the cursor runs past the end.
fn scan_worker(
    data: &[u8],
    segment_size: usize,
    cursor: &SegmentCursor,
    results: Sender<Result<StatTable>>,
    cancel: &CancelFlag,
) {
    let len = data.len() as u64;
    loop {
        if cancel.is_cancelled() {
            return;
        }
        let offset = cursor.claim(segment_size as u64);
        if offset >= len {
            return;
        }
        // offset < len, so it fits in usize
        let Some(range) = align_segment(data, offset as usize, segment_size) else {
            continue;
        };
        trace!("segment {}..{} (claimed at {})", range.start, range.end, offset);

        let result = aggregate_at(&data[range.clone()], range.start as u64);
        let failed = result.is_err();
        if results.send(result).is_err() || failed {
            return;
        }
    }
}

/// Maps the file at `path` read-only and aggregates it with
/// [`scan_segments`].
///
/// An empty file is not mapped and yields an empty table. Open, stat and
/// map failures are returned as [`crate::AggregateError::Io`].
///
/// The file must not be truncated or rewritten by another process while it
/// is being scanned.
pub fn run_mapped_file(path: impl AsRef<Path>, config: &ScanConfig) -> Result<StatTable> {
    config.validate()?;
    let path = path.as_ref();

    let file = File::open(path)?;
    let len = file.metadata()?.len();
    debug!("mapping {} ({} bytes)", path.display(), len);
    if len == 0 {
        return Ok(StatTable::new());
    }

    let map = map_read_only(&file)?;
    scan_segments(&map, config)
}

#[allow(unsafe_code)]
fn map_read_only(file: &File) -> std::io::Result<Mmap> {
    // SAFETY: the mapping is never written through and is dropped before
    // this run returns; concurrent modification of the file by another
    // process is outside what this crate can guard against.
    unsafe { Mmap::map(file) }
}
