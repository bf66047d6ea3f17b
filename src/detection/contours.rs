use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;

use crate::models::Region;

/// Find the outermost contours of a mask (any non-zero pixel is foreground).
///
/// Holes and anything nested inside another region are skipped. Regions
/// touching the image border are traced too.
pub fn find_external_regions(mask: &GrayImage) -> Vec<Region> {
    // Border tracing only starts after a background pixel, so give every
    // row and column one.
    let mut padded = GrayImage::new(mask.width() + 2, mask.height() + 2);
    image::imageops::replace(&mut padded, mask, 1, 1);

    find_contours::<i32>(&padded)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .filter_map(|c| {
            let points: Vec<Point<i32>> = c
                .points
                .iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect();
            region_from_points(&points)
        })
        .collect()
}

/// Reduce a closed contour to its bounding box and shoelace area
pub fn region_from_points(points: &[Point<i32>]) -> Option<Region> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    Some(Region {
        min_x: min_x.max(0) as u32,
        min_y: min_y.max(0) as u32,
        max_x: max_x.max(0) as u32,
        max_y: max_y.max(0) as u32,
        area: polygon_area(points),
    })
}

/// Area enclosed by the contour polygon
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice_area: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();
    twice_area.abs() as f64 / 2.0
}
