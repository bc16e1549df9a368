//! Fuzz target: `JsonLinesSource::next_sample`
//!
//! Feeds arbitrary bytes through the JSON-lines reader and drives the
//! controller with whatever samples survive.  Malformed lines must be
//! skipped, never panic.
//!
//! cargo fuzz run fuzz_json_sample

#![no_main]

use fuzzydrive::FuzzyController;
use fuzzydrive::adapters::json_lines::JsonLinesSource;
use fuzzydrive::app::ports::SamplePort;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(mut controller) = FuzzyController::new() else {
        return;
    };
    let mut source = JsonLinesSource::new(data);

    while let Some(sample) = source.next_sample() {
        let out = controller.evaluate(&sample);
        assert!((-1..=6).contains(&out.gear));
    }
});
