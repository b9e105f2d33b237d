//! Configuration for scan runs.
//!
//! - [`ScanConfig`] - Block sizes, worker count and queue depth
//! - [`ScanMode`] - Which execution strategy [`crate::run`] uses

use std::num::NonZeroUsize;

use crate::error::AggregateError;

/// Default streaming read size (64 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Default mapped-mode segment size (2 MiB).
pub const DEFAULT_SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Queue slots per worker for the chunk queue.
pub const CHUNK_QUEUE_PER_WORKER: usize = 3;

/// Queue slots per worker for the result queue.
pub const RESULT_QUEUE_PER_WORKER: usize = 2;

/// Configuration for a scan run.
///
/// `chunk_size` is the block size the streaming producer reads at a time;
/// `segment_size` is the claim size for the mapped scan. Neither has to be
/// larger than the longest line.
///
/// # Example
///
/// ```
/// use linefold::ScanConfig;
///
/// let config = ScanConfig::default()
///     .with_chunk_size(1 << 20)
///     .with_workers(4);
/// assert_eq!(config.workers(), 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanConfig {
    chunk_size: usize,
    segment_size: usize,
    workers: usize,
    queue_depth: Option<usize>,
}

impl ScanConfig {
    /// Creates a new configuration.
    ///
    /// Returns error if any size or the worker count is zero.
    pub fn new(chunk_size: usize, segment_size: usize, workers: usize) -> Result<Self, AggregateError> {
        if chunk_size == 0 {
            return Err(AggregateError::InvalidConfig {
                message: "chunk_size must be non-zero",
            });
        }

        if segment_size == 0 {
            return Err(AggregateError::InvalidConfig {
                message: "segment_size must be non-zero",
            });
        }

        if workers == 0 {
            return Err(AggregateError::InvalidConfig {
                message: "workers must be non-zero",
            });
        }

        Ok(Self {
            chunk_size,
            segment_size,
            workers,
            queue_depth: None,
        })
    }

    /// Sets the streaming read size.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the mapped-mode segment size.
    pub fn with_segment_size(mut self, size: usize) -> Self {
        self.segment_size = size;
        self
    }

    /// Sets the number of worker threads.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Overrides the queue depth derived from the worker count.
    pub fn with_queue_depth(mut self, depth: usize) -> Self {
        self.queue_depth = Some(depth);
        self
    }

    /// Returns the streaming read size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the mapped-mode segment size.
    pub fn segment_size(&self) -> usize {
        self.segment_size
    }

    /// Returns the number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Capacity of the queue feeding chunks to workers.
    pub fn chunk_queue_depth(&self) -> usize {
        self.queue_depth
            .unwrap_or(self.workers * CHUNK_QUEUE_PER_WORKER)
            .max(1)
    }

    /// Capacity of the queue feeding partial tables to the collector.
    pub fn result_queue_depth(&self) -> usize {
        self.queue_depth
            .unwrap_or(self.workers * RESULT_QUEUE_PER_WORKER)
            .max(1)
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), AggregateError> {
        Self::new(self.chunk_size, self.segment_size, self.workers).map(|_| ())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            segment_size: DEFAULT_SEGMENT_SIZE,
            workers: default_workers(),
            queue_depth: None,
        }
    }
}

/// One worker per available core.
fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Execution strategy for [`crate::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanMode {
    /// Map regular files, stream everything else.
    #[default]
    Auto,
    /// Always use the chunker pipeline.
    Stream,
    /// Always map the file.
    Mapped,
}
