//! Cropping detection boxes out of the source image.

use image::{imageops, RgbImage};
use thiserror::Error;

use crate::model::{BBoxXYXY, Pixel};

/// Why a region could not be extracted.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RegionError {
    /// The box has no area after clamping to the image.
    #[error("box {bbox} covers no pixels of a {width}x{height} image")]
    Empty {
        bbox: BBoxXYXY<Pixel>,
        width: u32,
        height: u32,
    },
}

/// Integer pixel rectangle `[x, x + width) x [y, y + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Resolves `bbox` to the pixel rectangle it covers inside a
/// `width x height` image.
///
/// The minimum corner is floored and the maximum corner is ceiled, so boxes
/// with integral coordinates map to exactly their own size.
pub fn clamp_to_image(
    bbox: &BBoxXYXY<Pixel>,
    width: u32,
    height: u32,
) -> Result<PixelRect, RegionError> {
    let empty = || RegionError::Empty {
        bbox: *bbox,
        width,
        height,
    };
    if !bbox.is_finite() {
        return Err(empty());
    }

    let (w, h) = (f64::from(width), f64::from(height));
    let x0 = bbox.xmin().floor().clamp(0.0, w);
    let y0 = bbox.ymin().floor().clamp(0.0, h);
    let x1 = bbox.xmax().ceil().clamp(0.0, w);
    let y1 = bbox.ymax().ceil().clamp(0.0, h);

    if x1 <= x0 || y1 <= y0 {
        return Err(empty());
    }

    // Values are integral and within [0, u32::MAX] after clamping.
    Ok(PixelRect {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}

/// Crops the part of `image` covered by `bbox`, clamped to the image bounds.
pub fn extract(image: &RgbImage, bbox: &BBoxXYXY<Pixel>) -> Result<RgbImage, RegionError> {
    let rect = clamp_to_image(bbox, image.width(), image.height())?;
    Ok(imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image())
}
