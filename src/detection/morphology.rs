use image::{GrayImage, Luma};
use imageproc::map::map_colors2;
use imageproc::morphology::{Mask, grayscale_dilate, grayscale_erode};

/// Morphological gradient (dilation minus erosion) with a 3x3 rectangular element.
///
/// Neighbours outside the image are ignored, so borders do not light up.
pub fn morphological_gradient_3x3(gray: &GrayImage) -> GrayImage {
    let element = Mask::square(1);
    let dilated = grayscale_dilate(gray, &element);
    let eroded = grayscale_erode(gray, &element);
    map_colors2(&dilated, &eroded, |max, min| Luma([max[0] - min[0]]))
}
