use image::{GrayImage, ImageBuffer, Luma, RgbImage};
use imageproc::contrast::equalize_histogram;
use imageproc::edges::canny;
use imageproc::filter::separable_filter_equal;

/// Convert image to grayscale
pub fn to_grayscale(img: &RgbImage) -> GrayImage {
    image::imageops::grayscale(img)
}

/// Spread intensities over the full range
pub fn equalize(img: &GrayImage) -> GrayImage {
    equalize_histogram(img)
}

/// 1-D Gaussian weights for an odd kernel size, sigma derived from the size.
///
/// Sizes up to 7 use the binomial tables, larger sizes sample a Gaussian with
/// `sigma = 0.3 * ((ksize - 1) * 0.5 - 1) + 0.8` and normalize.
pub fn gaussian_kernel(ksize: u32) -> Vec<f32> {
    match ksize {
        0 | 1 => vec![1.0],
        3 => vec![0.25, 0.5, 0.25],
        5 => vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
        7 => vec![0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
        _ => {
            let sigma = 0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8;
            let center = (ksize as f64 - 1.0) / 2.0;
            let weights: Vec<f64> = (0..ksize)
                .map(|i| {
                    let d = i as f64 - center;
                    (-(d * d) / (2.0 * sigma * sigma)).exp()
                })
                .collect();
            let total: f64 = weights.iter().sum();
            weights.iter().map(|w| (w / total) as f32).collect()
        }
    }
}

/// 3x3 Gaussian blur to take the edge off sensor noise before Canny
pub fn apply_blur_3x3(img: &GrayImage) -> GrayImage {
    separable_filter_equal(img, &gaussian_kernel(3))
}

/// Detect edges using Canny edge detector.
///
/// Thresholds given in the wrong order are swapped rather than rejected.
/// Both must be finite; `DetectionMode::from_tag` rejects anything else.
pub fn detect_edges(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    let (low, high) = if low_threshold > high_threshold {
        (high_threshold, low_threshold)
    } else {
        (low_threshold, high_threshold)
    };
    canny(img, low, high)
}

/// Gaussian-weighted mean over a `ksize` x `ksize` window, borders replicated
pub fn local_gaussian_mean(img: &GrayImage, ksize: u32) -> GrayImage {
    let kernel = gaussian_kernel(ksize);
    let radius = (kernel.len() / 2) as i64;
    let (width, height) = img.dimensions();
    let clamp_x = |x: i64| x.clamp(0, width as i64 - 1) as u32;
    let clamp_y = |y: i64| y.clamp(0, height as i64 - 1) as u32;

    let horizontal: ImageBuffer<Luma<f32>, Vec<f32>> = ImageBuffer::from_fn(width, height, |x, y| {
        let sum = kernel.iter().enumerate().fold(0.0f32, |acc, (i, w)| {
            let sx = clamp_x(x as i64 + i as i64 - radius);
            acc + w * img.get_pixel(sx, y)[0] as f32
        });
        Luma([sum])
    });

    GrayImage::from_fn(width, height, |x, y| {
        let sum = kernel.iter().enumerate().fold(0.0f32, |acc, (i, w)| {
            let sy = clamp_y(y as i64 + i as i64 - radius);
            acc + w * horizontal.get_pixel(x, sy)[0]
        });
        Luma([sum.round().clamp(0.0, 255.0) as u8])
    })
}
