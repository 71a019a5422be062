//! Body-part analysis: region extraction, per-part analyzers and the
//! orchestrator that ties them to the emotion table.
//!
//! Each analyzer is a plain function from a cropped region to a state and
//! cannot fail. Regions below [`AnalyzerConfig::min_region_pixels`] get the
//! analyzer's documented default instead of a measurement, and so does a
//! tail mass with no dominant axis:
//!
//! | part  | default |
//! |-------|---------|
//! | eye   | `normal` |
//! | mouth | `closed` |
//! | tail  | `down`, 0° |

pub mod config;
pub mod eye;
mod luma;
pub mod mouth;
mod orchestrator;
pub mod region;
mod result;
pub mod tail;

use image::RgbImage;

pub use config::{AnalyzerConfig, BoundaryTieBreak, EyeConfig, MouthConfig, TailConfig};
pub use orchestrator::{select_representatives, Analyzer, Detect};
pub use region::{extract, RegionError};
pub use result::AnalysisResult;

fn pixel_count(region: &RgbImage) -> u64 {
    u64::from(region.width()) * u64::from(region.height())
}

/// Fuzz-only entrypoint: runs every part analyzer on a region built from
/// raw RGB bytes, `width` pixels per row. Trailing bytes that do not fill a
/// row are ignored; `None` when no full row is present.
#[cfg(feature = "fuzzing")]
pub fn fuzz_analyze_region(
    width: u32,
    rgb: &[u8],
    config: &AnalyzerConfig,
) -> Option<crate::model::BodyPartState> {
    let row = usize::try_from(width).ok()?.checked_mul(3)?;
    if row == 0 || rgb.len() < row {
        return None;
    }
    let height = u32::try_from(rgb.len() / row).ok()?;
    let used = row * height as usize;
    let region = RgbImage::from_raw(width, height, rgb[..used].to_vec())?;

    Some(crate::model::BodyPartState::new(
        Some(eye::analyze(&region, &config.eye, config.min_region_pixels)),
        Some(mouth::analyze(&region, &config.mouth, config.min_region_pixels)),
        Some(tail::analyze(&region, &config.tail, config.min_region_pixels).pose),
    ))
}
