//! Tail direction from the principal axis of the tail's pixel mass.
//!
//! Angles are in degrees in `[0, 360)`: 0° points right and angles grow
//! counter-clockwise, so 90° is up in the image.
//!
//! The tail is whichever Otsu class stays off the box border, so dark fur
//! on a light background and light fur on a dark one measure the same.
//! The second-order moments give an undirected axis. The direction along
//! it is chosen by the third moment: a tail tapers toward its tip, so the
//! mass distribution is skewed toward the tip. Symmetric masses keep the
//! axis angle in `[0, 180)`.

use image::RgbImage;

use super::config::{BoundaryTieBreak, TailConfig};
use super::luma::{otsu_threshold, to_gray};
use crate::model::{TailPose, TailPosition};

/// Default pose for regions too small to measure or without a dominant axis.
pub const SMALL_REGION_POSE: TailPose = TailPose {
    position: TailPosition::Down,
    angle: 0.0,
};

/// Skewness magnitude below which a mass counts as symmetric.
const SKEW_EPSILON: f64 = 1e-3;

/// Full tail measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TailReading {
    pub pose: TailPose,
    /// Foreground bounding-box width over region width.
    pub width_ratio: f64,
    /// Foreground bounding-box height over region height.
    pub height_ratio: f64,
}

/// Normalizes any finite angle into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Buckets an angle into the quadrant centered on each cardinal direction.
///
/// Boundaries sit at 45°, 135°, 225° and 315°; `tie` decides which side
/// owns them.
pub fn bucket(angle: f64, tie: BoundaryTieBreak) -> TailPosition {
    let a = normalize_angle(angle);
    match tie {
        BoundaryTieBreak::CounterClockwise => match a {
            a if a < 45.0 => TailPosition::Right,
            a if a < 135.0 => TailPosition::Up,
            a if a < 225.0 => TailPosition::Left,
            a if a < 315.0 => TailPosition::Down,
            _ => TailPosition::Right,
        },
        BoundaryTieBreak::Clockwise => match a {
            a if a <= 45.0 => TailPosition::Right,
            a if a <= 135.0 => TailPosition::Up,
            a if a <= 225.0 => TailPosition::Left,
            a if a <= 315.0 => TailPosition::Down,
            _ => TailPosition::Right,
        },
    }
}

/// Foreground mask: the Otsu class with fewer pixels on the region border.
/// Ties go to the smaller class, then to the bright one. A region with a
/// single class is all foreground.
fn foreground(region: &RgbImage) -> Vec<(u32, u32)> {
    let gray = to_gray(region);
    let threshold = otsu_threshold(&gray);
    let (w, h) = gray.dimensions();

    let (mut bright, mut dark) = (Vec::new(), Vec::new());
    let (mut bright_border, mut dark_border) = (0usize, 0usize);
    for (x, y, p) in gray.enumerate_pixels() {
        let border = usize::from(x == 0 || y == 0 || x + 1 == w || y + 1 == h);
        if p[0] > threshold {
            bright.push((x, y));
            bright_border += border;
        } else {
            dark.push((x, y));
            dark_border += border;
        }
    }

    if bright.is_empty() {
        return dark;
    }
    if dark.is_empty() {
        return bright;
    }
    if (dark_border, dark.len()) < (bright_border, bright.len()) {
        dark
    } else {
        bright
    }
}

/// Direction of the mass in degrees, `[0, 360)`.
///
/// `None` for an empty mass or one with the same spread in every direction,
/// which has no principal axis.
fn principal_angle(points: &[(u32, u32)]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }

    // Raw moments in exact integer arithmetic so that symmetric masses give
    // an exactly zero cross moment. y is flipped to make angles
    // counter-clockwise in the image.
    let (mut sx, mut sy, mut sxx, mut syy, mut sxy) = (0i128, 0i128, 0i128, 0i128, 0i128);
    for &(x, y) in points {
        let (x, y) = (i128::from(x), -i128::from(y));
        sx += x;
        sy += y;
        sxx += x * x;
        syy += y * y;
        sxy += x * y;
    }
    let n = points.len() as i128;
    // Central moments scaled by n^2; the scale cancels in the angle.
    let mu20 = n * sxx - sx * sx;
    let mu02 = n * syy - sy * sy;
    let mu11 = n * sxy - sx * sy;
    if mu11 == 0 && mu20 == mu02 {
        return None;
    }

    let mut axis = 0.5 * ((2 * mu11) as f64).atan2((mu20 - mu02) as f64).to_degrees();
    if axis < 0.0 {
        axis += 180.0;
    }

    let (cx, cy) = (sx as f64 / n as f64, sy as f64 / n as f64);
    let (sin, cos) = axis.to_radians().sin_cos();
    let (mut m2, mut m3) = (0.0, 0.0);
    for &(x, y) in points {
        let s = (f64::from(x) - cx) * cos + (-f64::from(y) - cy) * sin;
        m2 += s * s;
        m3 += s * s * s;
    }
    let count = points.len() as f64;
    m2 /= count;
    m3 /= count;

    let mut angle = axis;
    if m2 > 0.0 && m3 / m2.powf(1.5) < -SKEW_EPSILON {
        angle += 180.0;
    }
    Some(normalize_angle(angle))
}

/// Measures the tail in `region`.
///
/// Regions below `min_region_pixels` and masses without a principal axis
/// get [`SMALL_REGION_POSE`].
pub fn analyze(region: &RgbImage, config: &TailConfig, min_region_pixels: u32) -> TailReading {
    let pixels = super::pixel_count(region);
    if pixels == 0 || pixels < u64::from(min_region_pixels) {
        return TailReading {
            pose: SMALL_REGION_POSE,
            width_ratio: 0.0,
            height_ratio: 0.0,
        };
    }

    let points = foreground(region);
    let (min_x, max_x, min_y, max_y) = points.iter().fold(
        (u32::MAX, 0, u32::MAX, 0),
        |(x0, x1, y0, y1), &(x, y)| (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
    );
    let (w, h) = region.dimensions();

    let pose = match principal_angle(&points) {
        Some(angle) => TailPose {
            position: bucket(angle, config.boundary),
            angle,
        },
        None => SMALL_REGION_POSE,
    };

    TailReading {
        pose,
        width_ratio: f64::from(max_x - min_x + 1) / f64::from(w),
        height_ratio: f64::from(max_y - min_y + 1) / f64::from(h),
    }
}
