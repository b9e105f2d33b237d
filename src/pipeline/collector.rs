//! Fan-in shared by the streaming pipeline and the segment scan.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::ScopedJoinHandle;

use crossbeam_channel::Receiver;

use crate::error::{AggregateError, Result};
use crate::stats::StatTable;

/// Set once by the collector on the first error; every stage polls it
/// between units of work.
#[derive(Debug, Default)]
pub(crate) struct CancelFlag(AtomicBool);

impl CancelFlag {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Merges partial tables in arrival order until every sender is gone.
///
/// Stops at the first error, raises the cancel flag and drops the
/// receiver, which unblocks any stage waiting to send. Results still in
/// the queue are discarded.
pub(crate) fn collect(results: Receiver<Result<StatTable>>, cancel: &CancelFlag) -> Result<StatTable> {
    let mut total = StatTable::new();
    let mut merged = 0usize;

    for result in results.iter() {
        match result {
            Ok(table) => {
                total.merge(table);
                merged += 1;
            }
            Err(e) => {
                cancel.cancel();
                log::debug!("run cancelled after {} partial tables: {}", merged, e);
                return Err(e);
            }
        }
    }

    log::trace!("merged {} partial tables", merged);
    Ok(total)
}

/// Joins every stage thread, turning a panic into [`AggregateError::WorkerPanicked`].
///
/// A panicked worker drops its sender silently, so a clean `collect` is
/// only trusted once all threads have been joined without a panic.
pub(crate) fn join_workers<'scope>(
    merged: Result<StatTable>,
    handles: impl IntoIterator<Item = ScopedJoinHandle<'scope, ()>>,
) -> Result<StatTable> {
    let mut panicked = false;
    for handle in handles {
        panicked |= handle.join().is_err();
    }

    match merged {
        Err(e) => Err(e),
        Ok(_) if panicked => Err(AggregateError::WorkerPanicked),
        Ok(table) => Ok(table),
    }
}
