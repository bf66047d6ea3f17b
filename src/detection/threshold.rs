use image::{GrayImage, Luma};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use imageproc::stats::histogram;

use super::mode::effective_block_size;
use super::preprocessing::local_gaussian_mean;

const FOREGROUND: u8 = 255;
const BACKGROUND: u8 = 0;

/// Mark pixels darker than their Gaussian-weighted neighbourhood by more than `c_value`.
///
/// Output is inverted binary: `255` where `src - mean <= -floor(c_value)`.
pub fn adaptive_threshold_inv(gray: &GrayImage, block_size: u32, c_value: f32) -> GrayImage {
    let block_size = effective_block_size(block_size);
    let mean = local_gaussian_mean(gray, block_size);
    let delta = c_value.floor() as i32;

    let mut mask = GrayImage::new(gray.width(), gray.height());
    for ((src, local), out) in gray.pixels().zip(mean.pixels()).zip(mask.pixels_mut()) {
        let diff = src[0] as i32 - local[0] as i32;
        *out = Luma([if diff > -delta { BACKGROUND } else { FOREGROUND }]);
    }
    mask
}

/// Global Otsu threshold, inverted: pixels at or below the level become foreground.
///
/// A histogram with one populated bin has nothing to separate and yields an empty mask.
pub fn otsu_threshold_inv(gray: &GrayImage) -> GrayImage {
    let populated_bins = histogram(gray).channels[0]
        .iter()
        .filter(|&&count| count > 0)
        .count();
    if populated_bins <= 1 {
        return GrayImage::new(gray.width(), gray.height());
    }

    let level = otsu_level(gray);
    log::debug!("Otsu level: {level}");

    threshold(gray, level, ThresholdType::BinaryInverted)
}
