//! Writes a deterministic measurement file for local benchmarking.
//!
//! Run with:
//!     cargo run --release --example generate -- measurements.txt 10000000

use std::fs::File;
use std::io::{BufWriter, Write};

const STATIONS: [&str; 16] = [
    "Abha",
    "Bulawayo",
    "Cracow",
    "Dodoma",
    "Halifax",
    "Hamburg",
    "İzmir",
    "Jakarta",
    "Kampala",
    "Oslo",
    "Palembang",
    "Roseau",
    "St. John's",
    "Tromsø",
    "Yerevan",
    "Zürich",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "measurements.txt".to_string());
    let rows: u64 = match args.next() {
        Some(n) => n.parse()?,
        None => 1_000_000,
    };

    println!("Writing {} rows to {}...", rows, path);

    let mut out = BufWriter::with_capacity(1 << 20, File::create(&path)?);
    let mut state = 0x9e37_79b9_7f4a_7c15_u64;
    for _ in 0..rows {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;

        let station = STATIONS[(state % STATIONS.len() as u64) as usize];
        let tenths = ((state >> 16) % 1999) as i64 - 999;
        let sign = if tenths < 0 { "-" } else { "" };
        writeln!(out, "{};{}{}.{}", station, sign, tenths.abs() / 10, tenths.abs() % 10)?;
    }
    out.flush()?;

    println!("Done.");
    Ok(())
}
