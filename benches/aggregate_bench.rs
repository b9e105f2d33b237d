//! Benchmarks for linefold.
//!
//! Run with:
//!     cargo bench

use std::io::Cursor;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use linefold::{ScanConfig, aggregate, parse_tenths, run_streaming, scan_segments};

const NAMES: [&str; 8] = [
    "Hamburg",
    "Bulawayo",
    "Palembang",
    "St. John's",
    "Cracow",
    "Bridgetown",
    "Istanbul",
    "Roseau",
];

/// Deterministic measurement rows, about 15 bytes each.
fn measurements(rows: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(rows * 16);
    let mut state = 0x2545_f491_u64;
    for _ in 0..rows {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let name = NAMES[(state % NAMES.len() as u64) as usize];
        let value = (state >> 8) % 1999;
        let value = value as i64 - 999;
        out.extend_from_slice(
            format!(
                "{};{}{}.{}\n",
                name,
                if value < 0 { "-" } else { "" },
                value.abs() / 10,
                value.abs() % 10
            )
            .as_bytes(),
        );
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for rows in [10_000, 100_000, 1_000_000] {
        let data = measurements(rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("aggregate", rows), &data, |b, data| {
            b.iter(|| {
                let table = aggregate(black_box(data)).unwrap();
                black_box(table.len())
            });
        });
    }

    group.bench_function("parse_tenths", |b| {
        b.iter(|| {
            for text in [&b"-99.9"[..], b"0.0", b"12.3", b"-4.5"] {
                black_box(parse_tenths(black_box(text)).unwrap());
            }
        });
    });

    group.finish();
}

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("modes");
    let data = measurements(1_000_000);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for workers in [1, 4] {
        group.bench_with_input(BenchmarkId::new("streaming", workers), &data, |b, data| {
            let config = ScanConfig::default()
                .with_chunk_size(1024 * 1024)
                .with_workers(workers);
            b.iter(|| {
                let table = run_streaming(Cursor::new(black_box(&data[..])), &config).unwrap();
                black_box(table.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("segments", workers), &data, |b, data| {
            let config = ScanConfig::default()
                .with_segment_size(256 * 1024)
                .with_workers(workers);
            b.iter(|| {
                let table = scan_segments(black_box(data), &config).unwrap();
                black_box(table.len())
            });
        });
    }

    group.finish();
}

fn bench_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_sizes");
    let data = measurements(200_000);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for size in [4 * 1024, 64 * 1024, 1024 * 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            let config = ScanConfig::default().with_chunk_size(size).with_workers(4);
            b.iter(|| {
                let table = run_streaming(Cursor::new(black_box(&data[..])), &config).unwrap();
                black_box(table.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_modes, bench_chunk_sizes);
criterion_main!(benches);
