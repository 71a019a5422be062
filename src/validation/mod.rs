//! Detection validation for catmood.
//!
//! Checks each detection against the image it belongs to:
//! - Class names must be a known body part
//! - Boxes must be finite with `x1 < x2` and `y1 < y2`
//! - Confidences must be finite (and should lie in `[0, 1]`)
//! - Boxes should lie inside the image (they are clamped otherwise)
//!
//! Errors reject the single detection they refer to. Warnings never reject.

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use crate::model::{Detection, Pixel};

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors (CLI exit status only).
    pub strict: bool,
}

/// Validates detections for an image of `width x height` pixels.
pub fn validate_detections(
    detections: &[Detection<Pixel>],
    width: u32,
    height: u32,
    _opts: &ValidateOptions,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    for (index, detection) in detections.iter().enumerate() {
        validate_detection(index, detection, width, height, &mut report);
    }

    report
}

fn validate_detection(
    index: usize,
    detection: &Detection<Pixel>,
    width: u32,
    height: u32,
    report: &mut ValidationReport,
) {
    let context = IssueContext::Detection { index };

    if let Err(err) = detection.part() {
        report.add(ValidationIssue::error(
            IssueCode::UnknownBodyPart,
            err.to_string(),
            context.clone(),
        ));
    }

    if !detection.confidence.is_finite() {
        report.add(ValidationIssue::error(
            IssueCode::ConfidenceNotFinite,
            format!("Non-finite confidence {}", detection.confidence),
            context.clone(),
        ));
    } else if !(0.0..=1.0).contains(&detection.confidence) {
        report.add(ValidationIssue::warning(
            IssueCode::ConfidenceOutOfRange,
            format!("Confidence {} outside [0, 1]", detection.confidence),
            context.clone(),
        ));
    }

    let bbox = &detection.bbox;

    if !bbox.is_finite() {
        report.add(ValidationIssue::error(
            IssueCode::BBoxNotFinite,
            format!("Non-finite coordinates {}", bbox),
            context,
        ));
        return;
    }

    if !bbox.is_ordered() {
        report.add(ValidationIssue::error(
            IssueCode::InvalidBBoxOrdering,
            format!("Invalid ordering {}: expected x1 < x2 and y1 < y2", bbox),
            context,
        ));
        return;
    }

    if !bbox.has_positive_extent() {
        report.add(ValidationIssue::error(
            IssueCode::InvalidBBoxArea,
            format!("Zero-area box {}", bbox),
            context,
        ));
        return;
    }

    let (w, h) = (f64::from(width), f64::from(height));
    if !bbox.clamped(w, h).has_positive_extent() {
        report.add(ValidationIssue::warning(
            IssueCode::BBoxOutsideImage,
            format!(
                "Box {} lies entirely outside image bounds (0, 0, {}, {})",
                bbox, width, height
            ),
            context,
        ));
    } else if !bbox.is_within(w, h) {
        report.add(ValidationIssue::warning(
            IssueCode::BBoxOutOfBounds,
            format!(
                "Box {} extends outside image bounds (0, 0, {}, {}) and will be clamped",
                bbox, width, height
            ),
            context,
        ));
    }
}
