#![allow(dead_code)]

use catmood::model::{BBoxXYXY, BodyPartState, EyeState, MouthState, Pixel, TailPose, TailPosition};
use image::{Rgb, RgbImage};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_eye_state() -> BoxedStrategy<EyeState> {
    prop::sample::select(EyeState::ALL.to_vec()).boxed()
}

pub fn arb_mouth_state() -> BoxedStrategy<MouthState> {
    prop::sample::select(MouthState::ALL.to_vec()).boxed()
}

pub fn arb_tail_pose() -> BoxedStrategy<TailPose> {
    (prop::sample::select(TailPosition::ALL.to_vec()), 0.0f64..360.0)
        .prop_map(|(position, angle)| TailPose { position, angle })
        .boxed()
}

pub fn arb_state() -> BoxedStrategy<BodyPartState> {
    (
        prop::option::of(arb_eye_state()),
        prop::option::of(arb_mouth_state()),
        prop::option::of(arb_tail_pose()),
    )
        .prop_map(|(eye, mouth, tail)| BodyPartState::new(eye, mouth, tail))
        .boxed()
}

/// Image dimensions small enough to keep cases fast.
pub fn arb_dims() -> BoxedStrategy<(u32, u32)> {
    (1u32..=64, 1u32..=64).boxed()
}

/// A box with integral corners strictly inside a `width x height` image.
pub fn arb_bbox_inside(width: u32, height: u32) -> BoxedStrategy<BBoxXYXY<Pixel>> {
    (0..width, 0..height)
        .prop_flat_map(move |(x0, y0)| (Just(x0), Just(y0), (x0 + 1)..=width, (y0 + 1)..=height))
        .prop_map(|(x0, y0, x1, y1)| {
            BBoxXYXY::from_xyxy(f64::from(x0), f64::from(y0), f64::from(x1), f64::from(y1))
        })
        .boxed()
}

/// Any finite ordered box, possibly extending past the image.
pub fn arb_bbox_anywhere(width: u32, height: u32) -> BoxedStrategy<BBoxXYXY<Pixel>> {
    let (w, h) = (f64::from(width), f64::from(height));
    (-w..2.0 * w, -h..2.0 * h, 0.5f64..w * 2.0, 0.5f64..h * 2.0)
        .prop_map(|(x, y, bw, bh)| BBoxXYXY::from_xyxy(x, y, x + bw, y + bh))
        .boxed()
}

/// An image of random gray noise with its dimensions.
pub fn arb_gray_image() -> BoxedStrategy<RgbImage> {
    arb_dims()
        .prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<u8>(), (w * h) as usize)
                .prop_map(move |values| {
                    RgbImage::from_fn(w, h, |x, y| {
                        let v = values[(y * w + x) as usize];
                        Rgb([v, v, v])
                    })
                })
        })
        .boxed()
}
