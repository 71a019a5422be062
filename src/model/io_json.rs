//! JSON reading and writing for detections and analysis results.
//!
//! Detections are a top-level array:
//!
//! ```json
//! [{"class_name": "eye", "confidence": 0.9, "bbox": [10, 10, 50, 50]}]
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::{Detection, Normalized, Pixel};
use crate::analysis::AnalysisResult;
use crate::error::CatMoodError;

/// Reads pixel-space detections from a JSON file.
pub fn read_detections_json(path: &Path) -> Result<Vec<Detection<Pixel>>, CatMoodError> {
    let file = File::open(path).map_err(CatMoodError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| CatMoodError::DetectionsJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads detections given in normalized `[0, 1]` coordinates and converts
/// them to pixels for an image of `width x height`.
pub fn read_normalized_detections_json(
    path: &Path,
    width: u32,
    height: u32,
) -> Result<Vec<Detection<Pixel>>, CatMoodError> {
    let file = File::open(path).map_err(CatMoodError::Io)?;
    let reader = BufReader::new(file);

    let detections: Vec<Detection<Normalized>> =
        serde_json::from_reader(reader).map_err(|source| CatMoodError::DetectionsJsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(detections
        .iter()
        .map(|d| d.to_pixel(width, height))
        .collect())
}

/// Reads an analysis result previously written by [`write_result_json`].
pub fn read_result_json(path: &Path) -> Result<AnalysisResult, CatMoodError> {
    let file = File::open(path).map_err(CatMoodError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| CatMoodError::ResultJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_result_json(path: &Path, result: &AnalysisResult) -> Result<(), CatMoodError> {
    let file = File::create(path).map_err(CatMoodError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, result).map_err(|source| CatMoodError::ResultJsonWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses detections from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<Vec<Detection<Pixel>>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parses detections from raw bytes.
pub fn from_json_slice(bytes: &[u8]) -> Result<Vec<Detection<Pixel>>, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes an analysis result to a pretty-printed JSON string.
pub fn to_json_string(result: &AnalysisResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::EmotionLabel;
    use crate::model::{BodyPart, BodyPartState, EyeState, TailPose, TailPosition};

    #[test]
    fn parses_detector_output() {
        let json = r#"[
            {"class_name": "eye", "confidence": 0.92, "bbox": [10, 10, 50, 50]},
            {"class": "tail", "confidence": 0.81, "bbox": [100.5, 100, 110, 300]}
        ]"#;
        let detections = from_json_str(json).expect("parse");
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].part(), Ok(BodyPart::Eye));
        assert_eq!(detections[1].class_name, "tail");
        assert_eq!(detections[1].bbox.xmin(), 100.5);
    }

    #[test]
    fn unknown_class_still_parses() {
        let detections =
            from_json_str(r#"[{"class_name": "paw", "confidence": 0.5, "bbox": [0, 0, 1, 1]}]"#)
                .expect("parse");
        assert!(detections[0].part().is_err());
    }

    #[test]
    fn short_bbox_is_a_parse_error() {
        assert!(
            from_json_str(r#"[{"class_name": "eye", "confidence": 0.5, "bbox": [0, 0, 1]}]"#)
                .is_err()
        );
    }

    #[test]
    fn result_json_shape() {
        let result = AnalysisResult {
            detections: vec![Detection::of(BodyPart::Tail, 0.8, 0.0, 0.0, 10.0, 40.0)],
            analysis: Some(BodyPartState::new(
                Some(EyeState::Normal),
                None,
                Some(TailPose {
                    position: TailPosition::Up,
                    angle: 90.0,
                }),
            )),
            emotion: Some(EmotionLabel::Neutral),
            rejected: Vec::new(),
        };
        let json = to_json_string(&result).expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["emotion"], "neutral");
        assert_eq!(value["analysis"]["tail_position"], "up");
        assert_eq!(value["analysis"]["tail_angle"], 90.0);
        assert_eq!(value["detections"][0]["bbox"][3], 40.0);
        assert!(value.get("rejected").is_none());

        let back: AnalysisResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, result);
    }

    #[test]
    fn empty_result_has_null_fields() {
        let json = to_json_string(&AnalysisResult::empty(Vec::new(), Vec::new())).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert!(value["analysis"].is_null());
        assert!(value["emotion"].is_null());
    }
}
