//! Fuzz target: `FuzzyController::evaluate`
//!
//! Reinterprets the input as a stream of five-`f32` samples (NaN and
//! infinities included) and asserts that every output stays finite and
//! inside its declared range.
//!
//! cargo fuzz run fuzz_evaluate

#![no_main]

use fuzzydrive::{FuzzyController, FuzzyInputs};
use libfuzzer_sys::fuzz_target;

fn read_f32(chunk: &[u8], i: usize) -> f32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&chunk[i * 4..i * 4 + 4]);
    f32::from_le_bytes(bytes)
}

fuzz_target!(|data: &[u8]| {
    let Ok(mut controller) = FuzzyController::new() else {
        return;
    };

    for chunk in data.chunks_exact(20) {
        let inputs = FuzzyInputs {
            speed: read_f32(chunk, 0),
            acceleration: read_f32(chunk, 1),
            path: read_f32(chunk, 2),
            next_path: read_f32(chunk, 3),
            stability: read_f32(chunk, 4),
        };
        let out = controller.evaluate(&inputs);

        assert!((-1.0..=1.0).contains(&out.steer), "steer {}", out.steer);
        assert!((0.0..=1.0).contains(&out.accel), "accel {}", out.accel);
        assert!((0.0..=1.0).contains(&out.brake), "brake {}", out.brake);
        assert!((-1..=6).contains(&out.gear), "gear {}", out.gear);
    }
});
