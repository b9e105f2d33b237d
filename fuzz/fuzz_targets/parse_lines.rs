#![no_main]

use libfuzzer_sys::fuzz_target;
use linefold::{Summary, aggregate, parse_tenths};

fuzz_target!(|data: Vec<u8>| {
    // Never panics, whatever the bytes
    let _ = parse_tenths(&data);

    match aggregate(&data) {
        Ok(table) => {
            let lines = data.split(|&b| b == b'\n').filter(|l| !l.is_empty()).count();
            assert_eq!(table.total_count(), lines as u64);

            for (_, entry) in table.iter() {
                assert!(entry.min() <= entry.mean());
                assert!(entry.mean() <= entry.max());
            }

            let mut out = Vec::new();
            Summary(&table).write_to(&mut out).unwrap();
            assert_eq!(out.last(), Some(&b'\n'));
        }
        Err(e) => assert!(e.is_format()),
    }
});
