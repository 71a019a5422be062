//! Detector output consumed by the analysis core.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::bbox::BBoxXYXY;
use super::space::{Normalized, Pixel};

/// The body parts the detector is trained to find.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyPart {
    Eye,
    Mouth,
    Tail,
}

impl BodyPart {
    pub const ALL: [BodyPart; 3] = [BodyPart::Eye, BodyPart::Mouth, BodyPart::Tail];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::Eye => "eye",
            BodyPart::Mouth => "mouth",
            BodyPart::Tail => "tail",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyPart {
    type Err = UnknownBodyPart;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eye" => Ok(BodyPart::Eye),
            "mouth" => Ok(BodyPart::Mouth),
            "tail" => Ok(BodyPart::Tail),
            other => Err(UnknownBodyPart(other.to_string())),
        }
    }
}

/// A class name the detector emitted that is not a known body part.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown body part '{0}' (expected eye, mouth or tail)")]
pub struct UnknownBodyPart(pub String);

/// One detected body part instance.
///
/// The class name is kept as the raw string the detector produced so that an
/// unexpected label is reported by validation rather than failing the whole
/// request at deserialization time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Detection<TSpace = Pixel> {
    /// Detector class label, normally `eye`, `mouth` or `tail`.
    #[serde(alias = "class")]
    pub class_name: String,

    /// Detector confidence, expected in `[0, 1]`.
    pub confidence: f64,

    /// Location of the part as `[x1, y1, x2, y2]`.
    pub bbox: BBoxXYXY<TSpace>,
}

impl<TSpace> Detection<TSpace> {
    pub fn new(class_name: impl Into<String>, confidence: f64, bbox: BBoxXYXY<TSpace>) -> Self {
        Self {
            class_name: class_name.into(),
            confidence,
            bbox,
        }
    }

    /// Parses the class name into a [`BodyPart`].
    pub fn part(&self) -> Result<BodyPart, UnknownBodyPart> {
        self.class_name.parse()
    }
}

impl Detection<Pixel> {
    /// Shorthand for a pixel-space detection with a known body part.
    pub fn of(part: BodyPart, confidence: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(part.as_str(), confidence, BBoxXYXY::from_xyxy(x1, y1, x2, y2))
    }
}

impl Detection<Normalized> {
    /// Converts to pixel coordinates for a `width x height` image.
    pub fn to_pixel(&self, image_width: u32, image_height: u32) -> Detection<Pixel> {
        Detection {
            class_name: self.class_name.clone(),
            confidence: self.confidence,
            bbox: self
                .bbox
                .to_pixel(f64::from(image_width), f64::from(image_height)),
        }
    }
}
