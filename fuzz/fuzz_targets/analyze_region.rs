//! Fuzz target for the per-part analyzers on arbitrary pixel data.
//!
//! The first byte picks the row width; the rest are RGB triples. Every
//! region must yield a state with a tail angle in `[0, 360)`.
//!
//! Run with:
//!   cargo +nightly fuzz run analyze_region

#![no_main]

use catmood::analysis::{fuzz_analyze_region, AnalyzerConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 || data.len() > 64 * 1024 {
        return;
    }
    let width = u32::from(data[0]) + 1;
    let Some(state) = fuzz_analyze_region(width, &data[1..], &AnalyzerConfig::default()) else {
        return;
    };
    if let Some(angle) = state.tail_angle() {
        assert!((0.0..360.0).contains(&angle), "tail angle {angle}");
    }
});
