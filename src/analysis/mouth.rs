//! Mouth openness from edge structure.
//!
//! A closed mouth shows at most a thin lip line; an open mouth shows a
//! cavity whose outline spreads edges over most of the region's height.

use image::{GrayImage, RgbImage};

use super::config::MouthConfig;
use super::luma::{smooth3, to_gray};
use crate::model::MouthState;

/// Default state for regions too small to measure.
pub const SMALL_REGION_STATE: MouthState = MouthState::Closed;

/// Edge statistics over the interior of a region (one-pixel border excluded).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeProfile {
    /// Fraction of interior pixels that are edges.
    pub density: f64,
    /// Fraction of interior rows between the first and last edge row,
    /// inclusive. Zero when there are no edges.
    pub vertical_extent: f64,
}

/// Sobel gradient magnitude at an interior pixel.
fn sobel_magnitude(gray: &GrayImage, x: u32, y: u32) -> f64 {
    let p = |dx: i32, dy: i32| -> f64 {
        let sx = (x as i32 + dx) as u32;
        let sy = (y as i32 + dy) as u32;
        f64::from(gray.get_pixel(sx, sy)[0])
    };
    let gx = (p(1, -1) + 2.0 * p(1, 0) + p(1, 1)) - (p(-1, -1) + 2.0 * p(-1, 0) + p(-1, 1));
    let gy = (p(-1, 1) + 2.0 * p(0, 1) + p(1, 1)) - (p(-1, -1) + 2.0 * p(0, -1) + p(1, -1));
    gx.hypot(gy)
}

/// Computes the edge profile, or `None` if the region has no interior.
pub fn edge_profile(region: &RgbImage, config: &MouthConfig) -> Option<EdgeProfile> {
    let (w, h) = region.dimensions();
    if w < 3 || h < 3 {
        return None;
    }

    let gray = to_gray(region);
    let gray = if config.smooth { smooth3(&gray) } else { gray };

    let mut edges = 0u64;
    let mut first_row: Option<u32> = None;
    let mut last_row = 0u32;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            if sobel_magnitude(&gray, x, y) >= config.edge_magnitude {
                edges += 1;
                if first_row.is_none() {
                    first_row = Some(y);
                }
                last_row = y;
            }
        }
    }

    let interior_rows = f64::from(h - 2);
    let interior = f64::from(w - 2) * interior_rows;
    let vertical_extent =
        first_row.map_or(0.0, |first| f64::from(last_row - first + 1) / interior_rows);

    Some(EdgeProfile {
        density: edges as f64 / interior,
        vertical_extent,
    })
}

/// Open only when edges are both dense enough and tall enough.
pub fn classify_profile(profile: &EdgeProfile, config: &MouthConfig) -> MouthState {
    if profile.density >= config.open_edge_density
        && profile.vertical_extent >= config.open_vertical_extent
    {
        MouthState::Open
    } else {
        MouthState::Closed
    }
}

pub fn analyze(region: &RgbImage, config: &MouthConfig, min_region_pixels: u32) -> MouthState {
    if super::pixel_count(region) < u64::from(min_region_pixels) {
        return SMALL_REGION_STATE;
    }
    match edge_profile(region, config) {
        Some(profile) => classify_profile(&profile, config),
        None => SMALL_REGION_STATE,
    }
}
