//! Eye openness from the bright/dark pixel balance of the eye region.
//!
//! Open eyes show more of the bright iris and sclera relative to the dark
//! pupil and lid, so the bright-to-dark ratio grows with openness.

use image::RgbImage;

use super::config::EyeConfig;
use super::luma::{otsu_threshold, to_gray};
use crate::model::EyeState;

/// Ratio reported when a region has no dark pixels at all.
pub const RATIO_SENTINEL: f64 = f64::MAX;

/// Default state for regions too small to threshold.
pub const SMALL_REGION_STATE: EyeState = EyeState::Normal;

/// Counts bright (`> threshold`) and dark pixels and returns their ratio.
pub fn bright_dark_ratio(region: &RgbImage, config: &EyeConfig) -> f64 {
    let gray = to_gray(region);
    let threshold = if config.adaptive {
        otsu_threshold(&gray)
    } else {
        config.luma_threshold
    };

    let bright = gray.pixels().filter(|p| p[0] > threshold).count();
    let dark = gray.pixels().count() - bright;
    if dark == 0 {
        RATIO_SENTINEL
    } else {
        bright as f64 / dark as f64
    }
}

/// Maps a bright/dark ratio to an eye state. Monotone in `ratio`.
pub fn classify_ratio(ratio: f64, config: &EyeConfig) -> EyeState {
    if ratio > config.wide_open_ratio {
        EyeState::WideOpen
    } else if ratio < config.closed_ratio {
        EyeState::Closed
    } else {
        EyeState::Normal
    }
}

pub fn analyze(region: &RgbImage, config: &EyeConfig, min_region_pixels: u32) -> EyeState {
    if super::pixel_count(region) < u64::from(min_region_pixels) {
        return SMALL_REGION_STATE;
    }
    classify_ratio(bright_dark_ratio(region, config), config)
}
