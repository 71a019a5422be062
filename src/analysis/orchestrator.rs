//! Request-level flow: validate, pick one detection per part, analyze each
//! region and aggregate.

use std::collections::BTreeMap;

use image::RgbImage;
use tracing::{debug, warn};

use super::config::AnalyzerConfig;
use super::result::AnalysisResult;
use super::{eye, mouth, region, tail};
use crate::emotion;
use crate::error::CatMoodError;
use crate::model::{BodyPart, BodyPartState, Detection, EyeState, MouthState, TailPose};
use crate::validation::{validate_detections, ValidateOptions};

/// Source of detections for an image.
///
/// The analysis core never runs a model itself; anything that can turn an
/// image into pixel-space detections plugs in here.
pub trait Detect {
    fn detect(&self, image: &RgbImage) -> Result<Vec<Detection>, CatMoodError>;
}

impl<F> Detect for F
where
    F: Fn(&RgbImage) -> Result<Vec<Detection>, CatMoodError>,
{
    fn detect(&self, image: &RgbImage) -> Result<Vec<Detection>, CatMoodError> {
        self(image)
    }
}

/// Picks the representative detection index for each body part.
///
/// Highest confidence wins, then the larger box area, then the earlier
/// detection. Indices in `skip` and unknown class names are ignored.
pub fn select_representatives(
    detections: &[Detection],
    skip: &[usize],
) -> BTreeMap<BodyPart, usize> {
    let mut chosen: BTreeMap<BodyPart, usize> = BTreeMap::new();

    for (index, detection) in detections.iter().enumerate() {
        if skip.contains(&index) {
            continue;
        }
        let Ok(part) = detection.part() else {
            continue;
        };

        match chosen.get(&part) {
            Some(&current) if !outranks(detection, &detections[current]) => {}
            _ => {
                chosen.insert(part, index);
            }
        }
    }

    chosen
}

fn outranks(candidate: &Detection, current: &Detection) -> bool {
    if candidate.confidence != current.confidence {
        return candidate.confidence > current.confidence;
    }
    candidate.bbox.area() > current.bbox.area()
}

/// Runs the full analysis for single images.
#[derive(Clone, Debug, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes `image` given the detector's output for it.
    ///
    /// Only an empty image fails the request. Malformed detections are
    /// dropped and listed in [`AnalysisResult::rejected`]; a part whose
    /// region cannot be extracted is reported absent.
    pub fn analyze(
        &self,
        image: &RgbImage,
        detections: &[Detection],
    ) -> Result<AnalysisResult, CatMoodError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CatMoodError::EmptyImage { width, height });
        }

        let report = validate_detections(detections, width, height, &ValidateOptions::default());
        let skip = report.rejected_indices();
        let (errors, warnings) = report.into_partition();
        for issue in &warnings {
            debug!("{}", issue);
        }
        for issue in &errors {
            warn!("dropping detection: {}", issue);
        }

        let chosen = select_representatives(detections, &skip);
        debug!(
            "{} detection(s), {} dropped, representatives {:?}",
            detections.len(),
            skip.len(),
            chosen
        );

        let mut state = BodyPartState::default();
        for (&part, &index) in &chosen {
            let detection = &detections[index];
            match part {
                BodyPart::Eye => state.eye_state = self.eye(image, detection),
                BodyPart::Mouth => state.mouth_state = self.mouth(image, detection),
                BodyPart::Tail => state.tail = self.tail(image, detection),
            }
        }

        if state.is_empty() {
            debug!("no body part produced a state");
            return Ok(AnalysisResult::empty(detections.to_vec(), errors));
        }

        let emotion = emotion::aggregate(&state);
        debug!("aggregated {:?} into {}", state, emotion);

        Ok(AnalysisResult {
            detections: detections.to_vec(),
            analysis: Some(state),
            emotion: Some(emotion),
            rejected: errors,
        })
    }

    /// Runs `detector` on `image` and analyzes its output.
    pub fn detect_and_analyze(
        &self,
        detector: &impl Detect,
        image: &RgbImage,
    ) -> Result<AnalysisResult, CatMoodError> {
        let detections = detector.detect(image)?;
        self.analyze(image, &detections)
    }

    fn crop(&self, image: &RgbImage, detection: &Detection) -> Option<RgbImage> {
        match region::extract(image, &detection.bbox) {
            Ok(crop) => Some(crop),
            Err(err) => {
                warn!("{} region skipped: {}", detection.class_name, err);
                None
            }
        }
    }

    fn eye(&self, image: &RgbImage, detection: &Detection) -> Option<EyeState> {
        let crop = self.crop(image, detection)?;
        Some(eye::analyze(&crop, &self.config.eye, self.config.min_region_pixels))
    }

    fn mouth(&self, image: &RgbImage, detection: &Detection) -> Option<MouthState> {
        let crop = self.crop(image, detection)?;
        Some(mouth::analyze(&crop, &self.config.mouth, self.config.min_region_pixels))
    }

    fn tail(&self, image: &RgbImage, detection: &Detection) -> Option<TailPose> {
        let crop = self.crop(image, detection)?;
        let reading = tail::analyze(&crop, &self.config.tail, self.config.min_region_pixels);
        debug!(
            "tail {} at {:.1} deg, foreground {:.2}x{:.2}",
            reading.pose.position, reading.pose.angle, reading.width_ratio, reading.height_ratio
        );
        Some(reading.pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::EmotionLabel;
    use crate::model::{BBoxXYXY, TailPosition};
    use crate::validation::IssueCode;
    use image::Rgb;

    fn scene() -> RgbImage {
        let mut img = RgbImage::from_pixel(200, 320, Rgb([128, 128, 128]));
        for y in 10..50 {
            for x in 10..50 {
                img.put_pixel(x, y, Rgb([240, 240, 240]));
            }
        }
        for y in 100..300 {
            for x in 100..110 {
                img.put_pixel(x, y, Rgb([40, 40, 40]));
            }
        }
        img
    }

    fn scene_detections() -> Vec<Detection> {
        vec![
            Detection::of(BodyPart::Eye, 0.9, 10.0, 10.0, 50.0, 50.0),
            Detection::of(BodyPart::Mouth, 0.8, 20.0, 60.0, 60.0, 80.0),
            Detection::of(BodyPart::Tail, 0.85, 100.0, 100.0, 110.0, 300.0),
        ]
    }

    #[test]
    fn full_scene_is_alert() {
        let result = Analyzer::default()
            .analyze(&scene(), &scene_detections())
            .expect("analysis");
        let state = result.analysis.expect("state");
        assert_eq!(state.eye_state, Some(EyeState::WideOpen));
        assert_eq!(state.mouth_state, Some(MouthState::Closed));
        assert_eq!(state.tail_position(), Some(TailPosition::Up));
        assert_eq!(result.emotion, Some(EmotionLabel::Alert));
        assert_eq!(result.detections, scene_detections());
        assert!(result.rejected.is_empty());
    }

    #[test]
    fn tail_box_with_margin_still_reads_the_dark_tail() {
        let mut detections = scene_detections();
        detections[2] = Detection::of(BodyPart::Tail, 0.85, 90.0, 95.0, 120.0, 305.0);
        let result = Analyzer::default()
            .analyze(&scene(), &detections)
            .expect("analysis");
        let tail = result.analysis.and_then(|s| s.tail).expect("tail");
        assert_eq!(tail.position, TailPosition::Up);
        assert!((tail.angle - 90.0).abs() < 1e-6, "angle {}", tail.angle);
        assert_eq!(result.emotion, Some(EmotionLabel::Alert));
    }

    #[test]
    fn analyzer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Analyzer>();
    }

    #[test]
    fn no_detections_gives_null_analysis() {
        let result = Analyzer::default().analyze(&scene(), &[]).expect("analysis");
        assert_eq!(result.analysis, None);
        assert_eq!(result.emotion, None);
        assert!(result.detections.is_empty());
    }

    #[test]
    fn empty_image_is_an_error() {
        let err = Analyzer::default()
            .analyze(&RgbImage::new(0, 10), &scene_detections())
            .unwrap_err();
        assert!(matches!(err, CatMoodError::EmptyImage { width: 0, height: 10 }));
    }

    #[test]
    fn higher_confidence_wins() {
        let detections = vec![
            Detection::of(BodyPart::Eye, 0.5, 0.0, 0.0, 30.0, 30.0),
            Detection::of(BodyPart::Eye, 0.9, 0.0, 0.0, 10.0, 10.0),
        ];
        let chosen = select_representatives(&detections, &[]);
        assert_eq!(chosen.get(&BodyPart::Eye), Some(&1));
    }

    #[test]
    fn equal_confidence_prefers_larger_area() {
        let detections = vec![
            Detection::of(BodyPart::Eye, 0.9, 0.0, 0.0, 10.0, 10.0),
            Detection::of(BodyPart::Eye, 0.9, 0.0, 0.0, 20.0, 20.0),
        ];
        let chosen = select_representatives(&detections, &[]);
        assert_eq!(chosen.get(&BodyPart::Eye), Some(&1));
    }

    #[test]
    fn full_tie_keeps_first() {
        let detections = vec![
            Detection::of(BodyPart::Tail, 0.7, 0.0, 0.0, 10.0, 10.0),
            Detection::of(BodyPart::Tail, 0.7, 5.0, 5.0, 15.0, 15.0),
        ];
        let chosen = select_representatives(&detections, &[]);
        assert_eq!(chosen.get(&BodyPart::Tail), Some(&0));
    }

    #[test]
    fn skipped_indices_are_not_candidates() {
        let detections = vec![
            Detection::of(BodyPart::Mouth, 0.99, 0.0, 0.0, 10.0, 10.0),
            Detection::of(BodyPart::Mouth, 0.1, 0.0, 0.0, 10.0, 10.0),
        ];
        let chosen = select_representatives(&detections, &[0]);
        assert_eq!(chosen.get(&BodyPart::Mouth), Some(&1));
        assert_eq!(chosen.len(), 1);
    }

    #[test]
    fn malformed_detections_are_dropped_and_reported() {
        let mut detections = scene_detections();
        detections.push(Detection::new(
            "whisker",
            0.99,
            BBoxXYXY::from_xyxy(0.0, 0.0, 5.0, 5.0),
        ));
        // Inverted box for a higher-confidence eye.
        detections.push(Detection::of(BodyPart::Eye, 0.99, 50.0, 50.0, 10.0, 10.0));

        let result = Analyzer::default()
            .analyze(&scene(), &detections)
            .expect("analysis");
        assert_eq!(result.emotion, Some(EmotionLabel::Alert));
        assert_eq!(result.detections.len(), 5);
        let codes: Vec<IssueCode> = result.rejected.iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![IssueCode::UnknownBodyPart, IssueCode::InvalidBBoxOrdering]
        );
    }

    #[test]
    fn box_outside_image_makes_part_absent() {
        let detections = vec![
            Detection::of(BodyPart::Eye, 0.9, 10.0, 10.0, 50.0, 50.0),
            Detection::of(BodyPart::Tail, 0.9, 500.0, 500.0, 600.0, 700.0),
        ];
        let result = Analyzer::default()
            .analyze(&scene(), &detections)
            .expect("analysis");
        let state = result.analysis.expect("state");
        assert_eq!(state.eye_state, Some(EyeState::WideOpen));
        assert_eq!(state.tail, None);
        assert!(result.rejected.is_empty());
        assert_eq!(result.emotion, Some(EmotionLabel::Curious));
    }

    #[test]
    fn small_regions_use_defaults() {
        let detections = vec![
            Detection::of(BodyPart::Eye, 0.9, 10.0, 10.0, 13.0, 13.0),
            Detection::of(BodyPart::Mouth, 0.9, 20.0, 60.0, 23.0, 63.0),
            Detection::of(BodyPart::Tail, 0.9, 100.0, 100.0, 103.0, 103.0),
        ];
        let result = Analyzer::default()
            .analyze(&scene(), &detections)
            .expect("analysis");
        let state = result.analysis.expect("state");
        assert_eq!(state.eye_state, Some(eye::SMALL_REGION_STATE));
        assert_eq!(state.mouth_state, Some(mouth::SMALL_REGION_STATE));
        assert_eq!(state.tail, Some(tail::SMALL_REGION_POSE));
        assert_eq!(result.emotion, Some(EmotionLabel::Content));
    }

    #[test]
    fn detector_output_feeds_analysis() {
        let detector = |_: &RgbImage| -> Result<Vec<Detection>, CatMoodError> {
            Ok(scene_detections())
        };
        let result = Analyzer::default()
            .detect_and_analyze(&detector, &scene())
            .expect("analysis");
        assert_eq!(result.emotion, Some(EmotionLabel::Alert));
    }

    #[test]
    fn detector_errors_propagate() {
        let detector = |_: &RgbImage| -> Result<Vec<Detection>, CatMoodError> {
            Err(CatMoodError::Detector("model not loaded".into()))
        };
        let err = Analyzer::default()
            .detect_and_analyze(&detector, &scene())
            .unwrap_err();
        assert!(matches!(err, CatMoodError::Detector(_)));
    }
}
