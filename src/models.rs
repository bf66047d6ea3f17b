use image::{GrayImage, RgbImage};
use serde::Serialize;

/// Regions with a polygon area at or below this are counted but not drawn
pub const MIN_DRAWN_AREA: f64 = 50.0;

/// Bounding box in the original image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One external contour of a mask, reduced to its extent and enclosed area
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    /// Polygon area of the contour in square pixels
    pub area: f64,
}

impl Region {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            x: self.min_x,
            y: self.min_y,
            width: self.width(),
            height: self.height(),
        }
    }

    /// Whether the region is large enough to get a rectangle on the annotated image
    pub fn is_drawn(&self) -> bool {
        self.area > MIN_DRAWN_AREA
    }
}

/// Everything one detector call produces
#[derive(Debug, Clone)]
pub struct Detection {
    /// Copy of the input with the drawn regions boxed in green
    pub annotated: RgbImage,

    /// Edge or threshold map the regions were extracted from
    pub mask: GrayImage,

    /// All external contours of the mask, drawn or not
    pub regions: Vec<Region>,
}

impl Detection {
    /// Total number of external contours found in the mask
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn drawn_regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| r.is_drawn())
    }

    pub fn drawn_count(&self) -> usize {
        self.drawn_regions().count()
    }
}
