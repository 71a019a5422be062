//! Fuzz target for detections JSON parsing.
//!
//! Run with:
//!   cargo +nightly fuzz run detections_json_parse

#![no_main]

use catmood::model::io_json::from_json_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Detector output for one image is small; skip huge inputs.
    if data.len() > 1024 * 1024 {
        return;
    }

    let _ = from_json_slice(data);
});
