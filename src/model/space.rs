//! Coordinate space marker types.
//!
//! Zero-sized types used as type parameters to tell pixel boxes from
//! normalized boxes at compile time.

use std::fmt;

/// Marker type for pixel coordinates, with (0, 0) at the top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Marker type for coordinates expressed as fractions of the image size.
///
/// Some detectors emit these (YOLO-style output); they are converted to
/// [`Pixel`] before analysis.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
