use serde::{Deserialize, Serialize};

use crate::emotion::EmotionLabel;
use crate::model::{BodyPartState, Detection};
use crate::validation::ValidationIssue;

/// Output of one image analysis request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Every input detection, unchanged and in input order.
    pub detections: Vec<Detection>,

    /// Per-part states; `None` when no body part produced a state.
    pub analysis: Option<BodyPartState>,

    /// Aggregated label; `None` exactly when `analysis` is `None`.
    pub emotion: Option<EmotionLabel>,

    /// Errors for detections that were dropped before analysis.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<ValidationIssue>,
}

impl AnalysisResult {
    /// A result with no usable body part.
    pub fn empty(detections: Vec<Detection>, rejected: Vec<ValidationIssue>) -> Self {
        Self {
            detections,
            analysis: None,
            emotion: None,
            rejected,
        }
    }
}
