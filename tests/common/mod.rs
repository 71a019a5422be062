#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use catmood::model::{BodyPart, Detection};
use image::{Rgb, RgbImage};

pub const BACKGROUND: Rgb<u8> = Rgb([128, 128, 128]);
pub const EYE_WHITE: Rgb<u8> = Rgb([240, 240, 240]);
pub const TAIL_FUR: Rgb<u8> = Rgb([40, 40, 40]);

pub fn fill(image: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x, y, color);
        }
    }
}

/// A 200x320 scene: bright eye at (10,10)-(50,50), flat mouth area at
/// (20,60)-(60,80) and a tall dark tail at (100,100)-(110,300).
pub fn alert_cat() -> RgbImage {
    let mut image = RgbImage::from_pixel(200, 320, BACKGROUND);
    fill(&mut image, 10, 10, 50, 50, EYE_WHITE);
    fill(&mut image, 100, 100, 110, 300, TAIL_FUR);
    image
}

pub fn alert_cat_detections() -> Vec<Detection> {
    vec![
        Detection::of(BodyPart::Eye, 0.9, 10.0, 10.0, 50.0, 50.0),
        Detection::of(BodyPart::Mouth, 0.8, 20.0, 60.0, 60.0, 80.0),
        Detection::of(BodyPart::Tail, 0.85, 100.0, 100.0, 110.0, 300.0),
    ]
}

/// The alert scene with the tail swapped for a dark wedge hanging down:
/// 40 wide at y = 100, narrowing to a point at y = 300, centered on x = 120.
pub fn fearful_cat() -> RgbImage {
    let mut image = RgbImage::from_pixel(200, 320, BACKGROUND);
    fill(&mut image, 10, 10, 50, 50, EYE_WHITE);
    for y in 100..300 {
        let half = (300 - y) * 20 / 200;
        fill(&mut image, 120 - half, y, 120 + half, y + 1, TAIL_FUR);
    }
    image
}

/// Detections for [`fearful_cat`]; the tail box leaves a background margin
/// on every side of the wedge.
pub fn fearful_cat_detections() -> Vec<Detection> {
    vec![
        Detection::of(BodyPart::Eye, 0.9, 10.0, 10.0, 50.0, 50.0),
        Detection::of(BodyPart::Mouth, 0.8, 20.0, 60.0, 60.0, 80.0),
        Detection::of(BodyPart::Tail, 0.85, 90.0, 90.0, 150.0, 310.0),
    ]
}

pub fn write_png(path: &Path, image: &RgbImage) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    image.save(path).expect("write png file");
}

pub fn write_json(path: &Path, json: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, json).expect("write json file");
}

pub fn write_detections(path: &Path, detections: &[Detection]) {
    let json = serde_json::to_string_pretty(detections).expect("serialize detections");
    write_json(path, &json);
}

/// Writes the alert scene and its detections into `dir`.
pub fn write_alert_fixture(dir: &Path) -> (PathBuf, PathBuf) {
    let image = dir.join("cat.png");
    let detections = dir.join("detections.json");
    write_png(&image, &alert_cat());
    write_detections(&detections, &alert_cat_detections());
    (image, detections)
}
