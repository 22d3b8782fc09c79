#![no_main]

use libfuzzer_sys::fuzz_target;
use prover_benchstats::aggregate::Aggregator;
use prover_benchstats::record::RawRecord;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must never panic; accepted records must fold cleanly
        if let Ok(record) = RawRecord::from_json_line(input) {
            let _ = record.prover.group_key();
            let mut aggregator = Aggregator::new();
            aggregator.ingest(&record);
        }
    }
});
