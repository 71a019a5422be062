//! Grayscale helpers shared by the analyzers.

use image::{imageops, GrayImage, Luma, RgbImage};

pub fn to_gray(region: &RgbImage) -> GrayImage {
    imageops::grayscale(region)
}

/// Otsu's threshold: the luma `t` maximizing between-class variance of
/// `{<= t}` and `{> t}`.
///
/// Returns the single present value for uniform images, so every pixel
/// falls in the `<= t` class.
pub fn otsu_threshold(gray: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for Luma([v]) in gray.pixels() {
        histogram[*v as usize] += 1;
    }

    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return 0;
    }
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(v, &n)| v as f64 * n as f64)
        .sum();

    let mut best: Option<(u8, f64)> = None;
    let mut weight_low = 0u64;
    let mut sum_low = 0.0;

    for (t, &count) in histogram.iter().enumerate() {
        weight_low += count;
        sum_low += t as f64 * count as f64;
        let weight_high = total - weight_low;
        if weight_low == 0 || weight_high == 0 {
            continue;
        }

        let mean_low = sum_low / weight_low as f64;
        let mean_high = (sum_all - sum_low) / weight_high as f64;
        let between = weight_low as f64 * weight_high as f64 * (mean_low - mean_high).powi(2);
        if best.map_or(true, |(_, b)| between > b) {
            best = Some((t as u8, between));
        }
    }

    match best {
        Some((t, _)) => t,
        // Uniform region: the only value present.
        None => histogram
            .iter()
            .position(|&n| n > 0)
            .map_or(0, |v| v as u8),
    }
}

/// 3x3 binomial blur (`[1 2 1]` in both directions) with edge clamping.
///
/// Integer arithmetic keeps uniform regions exactly uniform.
pub fn smooth3(gray: &GrayImage) -> GrayImage {
    const KERNEL: [u32; 3] = [1, 2, 1];
    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return gray.clone();
    }

    GrayImage::from_fn(w, h, |x, y| {
        let mut acc = 0u32;
        for (ky, wy) in KERNEL.iter().enumerate() {
            let sy = (y + ky as u32).saturating_sub(1).min(h - 1);
            for (kx, wx) in KERNEL.iter().enumerate() {
                let sx = (x + kx as u32).saturating_sub(1).min(w - 1);
                acc += wx * wy * u32::from(gray.get_pixel(sx, sy)[0]);
            }
        }
        Luma([((acc + 8) / 16) as u8])
    })
}
