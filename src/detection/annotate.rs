use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::models::Region;

pub const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const BOX_THICKNESS: u32 = 2;

/// Copy `image` and box every region that passes the drawing area filter
pub fn draw_regions(image: &RgbImage, regions: &[Region]) -> RgbImage {
    let mut canvas = image.clone();
    for region in regions.iter().filter(|r| r.is_drawn()) {
        draw_box(&mut canvas, region);
    }
    canvas
}

/// Rectangle with corners `(x, y)` and `(x + w, y + h)`, thickened outwards
fn draw_box(canvas: &mut RgbImage, region: &Region) {
    let bbox = region.bounding_box();
    for offset in 0..BOX_THICKNESS {
        let rect = Rect::at(bbox.x as i32 - offset as i32, bbox.y as i32 - offset as i32)
            .of_size(bbox.width + 1 + 2 * offset, bbox.height + 1 + 2 * offset);
        draw_hollow_rect_mut(canvas, rect, BOX_COLOR);
    }
}
