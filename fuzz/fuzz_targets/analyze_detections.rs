//! Fuzz target for the full analysis of arbitrary detections.
//!
//! Parsed detections, however malformed, must never make the analyzer
//! panic on a fixed synthetic image.
//!
//! Run with:
//!   cargo +nightly fuzz run analyze_detections

#![no_main]

use catmood::analysis::Analyzer;
use catmood::model::io_json::from_json_slice;
use image::{Rgb, RgbImage};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(detections) = from_json_slice(data) else {
        return;
    };

    let image = RgbImage::from_fn(64, 48, |x, y| Rgb([(x * 4) as u8, (y * 5) as u8, 90]));
    let _ = Analyzer::default().analyze(&image, &detections);
});
