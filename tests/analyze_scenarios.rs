use catmood::analysis::{AnalysisResult, Analyzer, AnalyzerConfig, BoundaryTieBreak};
use catmood::emotion::EmotionLabel;
use catmood::model::io_json::{
    read_detections_json, read_normalized_detections_json, read_result_json, write_result_json,
};
use catmood::model::{BodyPart, Detection, EyeState, MouthState, TailPosition};
use catmood::validation::IssueCode;
use image::RgbImage;

mod common;

fn analyze(image: &RgbImage, detections: &[Detection]) -> AnalysisResult {
    Analyzer::default()
        .analyze(image, detections)
        .expect("analysis succeeds")
}

#[test]
fn alert_cat_end_to_end() {
    let result = analyze(&common::alert_cat(), &common::alert_cat_detections());

    let state = result.analysis.expect("analysis present");
    assert_eq!(state.eye_state, Some(EyeState::WideOpen));
    assert_eq!(state.mouth_state, Some(MouthState::Closed));
    assert_eq!(state.tail_position(), Some(TailPosition::Up));
    let angle = state.tail_angle().expect("tail angle");
    assert!((angle - 90.0).abs() < 1.0, "angle {}", angle);
    assert_eq!(result.emotion, Some(EmotionLabel::Alert));
}

#[test]
fn dark_tail_in_loose_box_points_down() {
    let result = analyze(&common::fearful_cat(), &common::fearful_cat_detections());

    let state = result.analysis.expect("analysis present");
    assert_eq!(state.tail_position(), Some(TailPosition::Down));
    let angle = state.tail_angle().expect("tail angle");
    assert!((angle - 270.0).abs() < 1.0, "angle {}", angle);
    assert_eq!(result.emotion, Some(EmotionLabel::Fearful));
}

#[test]
fn tail_box_margin_does_not_change_alert_reading() {
    let mut detections = common::alert_cat_detections();
    detections[2] = Detection::of(BodyPart::Tail, 0.85, 90.0, 95.0, 120.0, 305.0);
    let result = analyze(&common::alert_cat(), &detections);

    let state = result.analysis.expect("analysis present");
    assert_eq!(state.tail_position(), Some(TailPosition::Up));
    let angle = state.tail_angle().expect("tail angle");
    assert!((angle - 90.0).abs() < 1.0, "angle {}", angle);
    assert_eq!(result.emotion, Some(EmotionLabel::Alert));
}

#[test]
fn result_survives_png_and_json_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (image_path, detections_path) = common::write_alert_fixture(dir.path());

    let image = image::open(&image_path).expect("decode png").to_rgb8();
    let detections = read_detections_json(&detections_path).expect("read detections");
    let result = analyze(&image, &detections);
    assert_eq!(result.emotion, Some(EmotionLabel::Alert));

    let result_path = dir.path().join("result.json");
    write_result_json(&result_path, &result).expect("write result");
    assert_eq!(read_result_json(&result_path).expect("read result"), result);
}

#[test]
fn normalized_detections_match_pixel_detections() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("normalized.json");
    common::write_json(
        &path,
        r#"[
            {"class_name": "eye", "confidence": 0.92, "bbox": [0.05, 0.03125, 0.25, 0.15625]},
            {"class_name": "tail", "confidence": 0.81, "bbox": [0.5, 0.3125, 0.55, 0.9375]}
        ]"#,
    );
    let detections = read_normalized_detections_json(&path, 200, 320).expect("read");
    assert_eq!(detections[0].bbox.to_array(), [10.0, 10.0, 50.0, 50.0]);

    let result = analyze(&common::alert_cat(), &detections);
    let state = result.analysis.expect("analysis");
    assert_eq!(state.eye_state, Some(EyeState::WideOpen));
    assert_eq!(state.tail_position(), Some(TailPosition::Up));
    assert_eq!(result.emotion, Some(EmotionLabel::Alert));
}

#[test]
fn no_detections_gives_null_analysis_and_emotion() {
    let result = analyze(&common::alert_cat(), &[]);
    assert!(result.detections.is_empty());
    assert_eq!(result.analysis, None);
    assert_eq!(result.emotion, None);
}

#[test]
fn only_larger_tied_eye_is_analyzed() {
    let mut image = common::alert_cat();
    // A dark square where the small candidate sits; the larger box still
    // has mostly bright pixels.
    common::fill(&mut image, 10, 10, 20, 20, common::TAIL_FUR);
    let detections = vec![
        Detection::of(BodyPart::Eye, 0.9, 10.0, 10.0, 20.0, 20.0),
        Detection::of(BodyPart::Eye, 0.9, 10.0, 10.0, 50.0, 50.0),
    ];
    let result = analyze(&image, &detections);
    assert_eq!(
        result.analysis.and_then(|s| s.eye_state),
        Some(EyeState::WideOpen)
    );
}

#[test]
fn malformed_detection_is_dropped_others_analyzed() {
    let mut detections = common::alert_cat_detections();
    detections.insert(
        0,
        Detection::of(BodyPart::Mouth, 0.99, 60.0, 60.0, 60.0, 80.0),
    );
    let result = analyze(&common::alert_cat(), &detections);

    assert_eq!(result.detections.len(), 4);
    assert_eq!(result.rejected.len(), 1);
    assert_eq!(result.rejected[0].code, IssueCode::InvalidBBoxArea);
    let state = result.analysis.expect("analysis");
    assert_eq!(state.mouth_state, Some(MouthState::Closed));
    assert_eq!(result.emotion, Some(EmotionLabel::Alert));
}

#[test]
fn open_mouth_changes_emotion() {
    let mut image = common::alert_cat();
    // Dark cavity inside the mouth box.
    common::fill(&mut image, 25, 63, 55, 77, image::Rgb([15, 15, 15]));
    let result = analyze(&image, &common::alert_cat_detections());
    let state = result.analysis.expect("analysis");
    assert_eq!(state.mouth_state, Some(MouthState::Open));
    assert_eq!(result.emotion, Some(EmotionLabel::Excited));
}

#[test]
fn config_file_changes_thresholds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    common::write_json(
        &path,
        "min_region_pixels: 100000\ntail:\n  boundary: clockwise\n",
    );
    let config = AnalyzerConfig::from_path(&path).expect("config");
    assert_eq!(config.tail.boundary, BoundaryTieBreak::Clockwise);

    // Every region is now below the minimum, so each part gets its default.
    let result = Analyzer::new(config)
        .analyze(&common::alert_cat(), &common::alert_cat_detections())
        .expect("analysis");
    let state = result.analysis.expect("analysis");
    assert_eq!(state.eye_state, Some(EyeState::Normal));
    assert_eq!(state.mouth_state, Some(MouthState::Closed));
    assert_eq!(state.tail_position(), Some(TailPosition::Down));
    assert_eq!(result.emotion, Some(EmotionLabel::Content));
}
