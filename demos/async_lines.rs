//! Aggregates a file read through tokio.
//!
//! The chunk stream is async; parsing each chunk is plain synchronous work
//! and runs on the blocking pool.
//!
//! Run with:
//!     cargo run --example async_lines --features async-io -- measurements.txt

use futures_util::StreamExt;
use tokio_util::compat::TokioAsyncReadCompatExt;

use linefold::{ScanConfig, StatTable, aggregate_at, chunk_lines_async, format_summary};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "measurements.txt".to_string());

    let file = tokio::fs::File::open(&path).await?;
    let config = ScanConfig::default().with_chunk_size(4 * 1024 * 1024);
    let mut stream = chunk_lines_async(file.compat(), &config);

    let mut pending = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        pending.push(tokio::task::spawn_blocking(move || {
            aggregate_at(&chunk.data, chunk.offset)
        }));
    }

    let mut total = StatTable::new();
    for handle in pending {
        total.merge(handle.await??);
    }

    println!("{} bytes, {} records", stream.offset(), total.total_count());
    println!("{}", format_summary(&total));
    Ok(())
}
