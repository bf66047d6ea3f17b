pub mod annotate;
pub mod contours;
pub mod mode;
pub mod morphology;
pub mod preprocessing;
pub mod threshold;

use image::{GrayImage, RgbImage};

use crate::models::Detection;
pub use mode::{DetectError, DetectionMode, DetectionParams, ModeKind, effective_block_size};

/// Run one detection strategy on an RGB image.
///
/// The input is left untouched; the annotated image is a fresh copy with the
/// same dimensions. Region count covers every external contour of the mask,
/// while only regions above the area filter get a rectangle.
pub fn detect_defects(image: &RgbImage, mode: &DetectionMode) -> Detection {
    let gray = preprocessing::to_grayscale(image);
    let mask = compute_mask(&gray, mode);

    let regions = contours::find_external_regions(&mask);
    let annotated = annotate::draw_regions(image, &regions);

    let detection = Detection {
        annotated,
        mask,
        regions,
    };

    log::debug!(
        "{} on {}x{}: {} regions ({} drawn)",
        mode.kind(),
        image.width(),
        image.height(),
        detection.region_count(),
        detection.drawn_count()
    );

    detection
}

/// Same as [`detect_defects`], with the mode given as a tag string
pub fn detect_defects_tagged(
    image: &RgbImage,
    tag: &str,
    params: &DetectionParams,
) -> Result<Detection, DetectError> {
    let mode = DetectionMode::from_tag(tag, params)?;
    Ok(detect_defects(image, &mode))
}

/// Produce the intermediate edge or threshold map for a mode
pub fn compute_mask(gray: &GrayImage, mode: &DetectionMode) -> GrayImage {
    match *mode {
        DetectionMode::Canny {
            low_threshold,
            high_threshold,
        } => {
            let equalized = preprocessing::equalize(gray);
            let blurred = preprocessing::apply_blur_3x3(&equalized);
            preprocessing::detect_edges(&blurred, low_threshold, high_threshold)
        }
        DetectionMode::Adaptive {
            block_size,
            c_value,
        } => threshold::adaptive_threshold_inv(gray, block_size, c_value),
        DetectionMode::Otsu => threshold::otsu_threshold_inv(gray),
        DetectionMode::Morph => morphology::morphological_gradient_3x3(gray),
    }
}
