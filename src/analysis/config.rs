//! Tunable analyzer parameters.
//!
//! The defaults are calibration choices, not contracts. Callers can override
//! any subset from a YAML or JSON file, missing keys keep their defaults:
//!
//! ```yaml
//! min_region_pixels: 16
//! eye:
//!   wide_open_ratio: 1.2
//! tail:
//!   boundary: clockwise
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatMoodError;

/// Parameters for all analyzers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Regions with fewer pixels than this get each analyzer's default state.
    pub min_region_pixels: u32,
    pub eye: EyeConfig,
    pub mouth: MouthConfig,
    pub tail: TailConfig,
}

/// Luminance-ratio classification of eye openness.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EyeConfig {
    /// Pixels with luma above this count as bright (sclera-like).
    pub luma_threshold: u8,
    /// Use Otsu's method per region instead of `luma_threshold`.
    pub adaptive: bool,
    /// Bright/dark ratios above this are `wide_open`.
    pub wide_open_ratio: f64,
    /// Bright/dark ratios below this are `closed`.
    pub closed_ratio: f64,
}

/// Edge-based classification of mouth openness.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MouthConfig {
    /// Apply a 3x3 binomial blur before edge detection.
    pub smooth: bool,
    /// Sobel gradient magnitude at or above which a pixel is an edge.
    pub edge_magnitude: f64,
    /// Minimum fraction of interior pixels that are edges for `open`.
    pub open_edge_density: f64,
    /// Minimum fraction of interior rows spanned by edges for `open`.
    pub open_vertical_extent: f64,
}

/// Which quadrant owns an angle that falls exactly on a boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryTieBreak {
    /// 45° is `up`, 135° is `left`, 225° is `down`, 315° is `right`.
    #[default]
    CounterClockwise,
    /// 45° is `right`, 135° is `up`, 225° is `left`, 315° is `down`.
    Clockwise,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TailConfig {
    pub boundary: BoundaryTieBreak,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_region_pixels: 16,
            eye: EyeConfig::default(),
            mouth: MouthConfig::default(),
            tail: TailConfig::default(),
        }
    }
}

impl Default for EyeConfig {
    fn default() -> Self {
        Self {
            luma_threshold: 128,
            adaptive: false,
            wide_open_ratio: 1.5,
            closed_ratio: 0.5,
        }
    }
}

impl Default for MouthConfig {
    fn default() -> Self {
        Self {
            smooth: true,
            edge_magnitude: 80.0,
            open_edge_density: 0.10,
            open_vertical_extent: 0.5,
        }
    }
}

impl AnalyzerConfig {
    /// Loads a config file (YAML, or JSON as a YAML subset) and validates it.
    pub fn from_path(path: &Path) -> Result<Self, CatMoodError> {
        let file = File::open(path).map_err(CatMoodError::Io)?;
        let config: AnalyzerConfig = serde_yaml::from_reader(BufReader::new(file)).map_err(
            |source| CatMoodError::ConfigParse {
                path: path.to_path_buf(),
                source,
            },
        )?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a config from a string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatMoodError> {
        let config: AnalyzerConfig =
            serde_yaml::from_str(yaml).map_err(|source| CatMoodError::ConfigParse {
                path: "<string>".into(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that thresholds are finite and consistently ordered.
    pub fn validate(&self) -> Result<(), CatMoodError> {
        let eye = &self.eye;
        if !eye.wide_open_ratio.is_finite() || !eye.closed_ratio.is_finite() {
            return Err(CatMoodError::InvalidConfig(
                "eye ratios must be finite".into(),
            ));
        }
        if eye.closed_ratio < 0.0 {
            return Err(CatMoodError::InvalidConfig(format!(
                "eye.closed_ratio must be non-negative, got {}",
                eye.closed_ratio
            )));
        }
        if eye.closed_ratio > eye.wide_open_ratio {
            return Err(CatMoodError::InvalidConfig(format!(
                "eye.closed_ratio ({}) must not exceed eye.wide_open_ratio ({})",
                eye.closed_ratio, eye.wide_open_ratio
            )));
        }

        let mouth = &self.mouth;
        if !(mouth.edge_magnitude.is_finite() && mouth.edge_magnitude > 0.0) {
            return Err(CatMoodError::InvalidConfig(format!(
                "mouth.edge_magnitude must be positive, got {}",
                mouth.edge_magnitude
            )));
        }
        for (name, value) in [
            ("mouth.open_edge_density", mouth.open_edge_density),
            ("mouth.open_vertical_extent", mouth.open_vertical_extent),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CatMoodError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
