#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use linefold::{LineChunker, ScanConfig, aggregate, aggregate_at, scan_segments};

fuzz_target!(|input: (u8, Vec<u8>)| {
    let (block, data) = input;
    let block = usize::from(block).max(1);

    let whole = aggregate(&data);

    // Chunker: bytes preserved, offsets contiguous, same table
    let bytes = Bytes::from(data.clone());
    let mut chunker = LineChunker::new();
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < bytes.len() {
        let end = (start + block).min(bytes.len());
        chunks.extend(chunker.push(bytes.slice(start..end)));
        start = end;
    }
    chunks.extend(chunker.finish());

    let mut expected_offset = 0u64;
    for chunk in &chunks {
        assert_eq!(chunk.offset, expected_offset);
        expected_offset += chunk.len() as u64;
    }
    assert_eq!(expected_offset, data.len() as u64);

    let mut chunked = linefold::StatTable::new();
    let mut chunked_ok = true;
    for chunk in &chunks {
        match aggregate_at(&chunk.data, chunk.offset) {
            Ok(table) => chunked.merge(table),
            Err(_) => {
                chunked_ok = false;
                break;
            }
        }
    }
    assert_eq!(whole.is_ok(), chunked_ok);

    // Segment scan agrees with a single pass
    let config = ScanConfig::default().with_segment_size(block).with_workers(3);
    match (&whole, scan_segments(&data, &config)) {
        (Ok(a), Ok(b)) => {
            assert_eq!(a, &b);
            assert_eq!(a, &chunked);
        }
        (Err(_), Err(e)) => assert!(e.is_format()),
        (a, b) => panic!("modes disagree: {:?} vs {:?}", a.is_ok(), b.is_ok()),
    }
});
