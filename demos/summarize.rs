//! Aggregates one file in both modes and checks they agree.
//!
//! Run with:
//!     cargo run --release --example summarize -- measurements.txt

use std::fs::File;
use std::time::Instant;

use linefold::{ScanConfig, format_summary, run_mapped_file, run_streaming};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "measurements.txt".to_string());
    let config = ScanConfig::default();

    println!("Aggregating {} with {} workers\n", path, config.workers());

    let started = Instant::now();
    let streamed = run_streaming(File::open(&path)?, &config)?;
    println!("streaming: {:?}", started.elapsed());

    let started = Instant::now();
    let mapped = run_mapped_file(&path, &config)?;
    println!("mapped:    {:?}", started.elapsed());

    assert_eq!(streamed, mapped, "modes disagree");
    println!(
        "\n{} names, {} records",
        mapped.len(),
        mapped.total_count()
    );
    println!("{}", format_summary(&mapped));
    Ok(())
}
