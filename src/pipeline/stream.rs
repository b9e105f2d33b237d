//! Streaming mode over an arbitrary reader.

use std::io::Read;
use std::thread;

use crossbeam_channel::{Receiver, Sender, bounded};
use log::{debug, trace};

use super::{CancelFlag, collect, join_workers};
use crate::chunk::LineChunk;
use crate::chunker::chunk_lines;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::parse::aggregate_at;
use crate::stats::StatTable;

/// Aggregates every record in `source`.
///
/// One producer thread reads `config.chunk_size()` blocks and splits them
/// on line boundaries; `config.workers()` threads parse chunks into private
/// tables; the calling thread merges tables as they arrive. Both queues are
/// bounded, so a slow parser stalls the reader rather than buffering the
/// input.
///
/// The first error from any stage cancels the run and is returned. Work
/// already queued at that point may or may not be processed; no partial
/// table is ever returned.
///
/// # Example
///
/// ```
/// use linefold::{run_streaming, ScanConfig};
/// use std::io::Cursor;
///
/// let input = Cursor::new(&b"foo;1.0\nbar;2.0\nfoo;3.0\n"[..]);
/// let config = ScanConfig::default().with_chunk_size(5).with_workers(2);
///
/// let table = run_streaming(input, &config)?;
/// assert_eq!(table.get(b"foo").unwrap().count(), 2);
/// # Ok::<(), linefold::AggregateError>(())
/// ```
pub fn run_streaming<R: Read + Send>(source: R, config: &ScanConfig) -> Result<StatTable> {
    config.validate()?;
    let workers = config.workers();
    debug!(
        "streaming run: {} workers, {} byte chunks, queue depth {}/{}",
        workers,
        config.chunk_size(),
        config.chunk_queue_depth(),
        config.result_queue_depth()
    );

    let cancel = CancelFlag::new();
    let (chunk_tx, chunk_rx) = bounded::<LineChunk>(config.chunk_queue_depth());
    let (result_tx, result_rx) = bounded::<Result<StatTable>>(config.result_queue_depth());

    let table = thread::scope(|s| {
        let cancel = &cancel;
        let mut handles = Vec::with_capacity(workers + 1);

        let producer_results = result_tx.clone();
        handles.push(s.spawn(move || produce(source, config, chunk_tx, producer_results, cancel)));

        for _ in 0..workers {
            let chunks = chunk_rx.clone();
            let results = result_tx.clone();
            handles.push(s.spawn(move || parse_chunks(chunks, results, cancel)));
        }
        drop(chunk_rx);
        drop(result_tx);

        let merged = collect(result_rx, cancel);
        join_workers(merged, handles)
    })?;

    debug!(
        "streaming run done: {} names, {} records",
        table.len(),
        table.total_count()
    );
    Ok(table)
}

/// Producer stage: chunk the source and feed the workers.
fn produce<R: Read>(
    source: R,
    config: &ScanConfig,
    chunks: Sender<LineChunk>,
    results: Sender<Result<StatTable>>,
    cancel: &CancelFlag,
) {
    for chunk in chunk_lines(source, config) {
        if cancel.is_cancelled() {
            return;
        }
        match chunk {
            Ok(chunk) => {
                trace!("queueing {}", chunk);
                if chunks.send(chunk).is_err() {
                    return;
                }
            }
            Err(e) => {
                let _ = results.send(Err(e));
                return;
            }
        }
    }
}

/// Worker stage: parse chunks until the queue closes or the run fails.
fn parse_chunks(chunks: Receiver<LineChunk>, results: Sender<Result<StatTable>>, cancel: &CancelFlag) {
    for chunk in chunks.iter() {
        if cancel.is_cancelled() {
            return;
        }
        let result = aggregate_at(&chunk.data, chunk.offset);
        let failed = result.is_err();
        if results.send(result).is_err() || failed {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AggregateError, FormatReason};
    use crate::format::format_summary;
    use std::io::{self, Cursor};

    fn config(chunk_size: usize, workers: usize) -> ScanConfig {
        ScanConfig::new(chunk_size, 1, workers).unwrap()
    }

    #[test]
    fn test_empty_source() {
        let table = run_streaming(Cursor::new(Vec::new()), &config(8, 2)).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_every_chunk_size() {
        let input = b"foo;1.0\nbar;2.0\nbaz;3.0\n";
        for size in 1..=input.len() {
            let table = run_streaming(Cursor::new(&input[..]), &config(size, 3)).unwrap();
            assert_eq!(
                format_summary(&table),
                "{bar=2.0/2.0/2.0, baz=3.0/3.0/3.0, foo=1.0/1.0/1.0}",
                "chunk size {}",
                size
            );
        }
    }

    #[test]
    fn test_format_error_surfaces_with_offset() {
        let input = b"a;1.0\nb;2.0\nbroken\nc;3.0\n";
        let err = run_streaming(Cursor::new(&input[..]), &config(4, 2)).unwrap_err();
        assert!(matches!(
            err,
            AggregateError::Format {
                offset: 12,
                reason: FormatReason::MissingSeparator
            }
        ));
    }

    #[test]
    fn test_read_error_aborts() {
        struct Broken(usize);
        impl Read for Broken {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.0 == 0 {
                    return Err(io::Error::other("gone"));
                }
                self.0 -= 1;
                let line = b"x;1.0\n";
                let n = line.len().min(buf.len());
                buf[..n].copy_from_slice(&line[..n]);
                Ok(n)
            }
        }

        let err = run_streaming(Broken(100), &config(64, 2)).unwrap_err();
        assert!(matches!(err, AggregateError::Io(_)));
    }

    #[test]
    fn test_invalid_config() {
        let bad = ScanConfig::default().with_workers(0);
        assert!(matches!(
            run_streaming(Cursor::new(Vec::new()), &bad),
            Err(AggregateError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_many_chunks_tiny_queues() {
        let mut input = Vec::new();
        for i in 0..2000 {
            input.extend_from_slice(format!("n{};{}.{}\n", i % 7, i % 50, i % 10).as_bytes());
        }
        let expected = crate::parse::aggregate(&input).unwrap();

        let cfg = config(17, 4).with_queue_depth(1);
        let table = run_streaming(Cursor::new(input), &cfg).unwrap();
        assert_eq!(table, expected);
    }
}
