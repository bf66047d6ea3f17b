use std::path::Path;

use image::{Rgb, RgbImage};
use tempfile::TempDir;

/// Bright sheet with nothing on it
pub fn uniform_image(width: u32, height: u32, color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, color)
}

/// `background` sheet with a filled `size` x `size` square at (`x`, `y`)
pub fn square_image(
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    size: u32,
    background: Rgb<u8>,
    square: Rgb<u8>,
) -> RgbImage {
    RgbImage::from_fn(width, height, |px, py| {
        if (x..x + size).contains(&px) && (y..y + size).contains(&py) {
            square
        } else {
            background
        }
    })
}

/// Dark 20x20 square (area 400) at (40, 40) on a light gray 100x100 sheet
pub fn dark_square_on_sheet() -> RgbImage {
    square_image(100, 100, 40, 40, 20, TEST_SHEET, TEST_BLACK)
}

/// Horizontal ramp with a few dark specks, so every mode has something to react to
pub fn textured_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let base = (60 + x * 150 / width.max(1)) as u8;
        if (x % 17 == 5 && y % 13 == 4) || (x + y) % 29 == 0 {
            Rgb([10, 10, 10])
        } else {
            Rgb([base, base, base])
        }
    })
}

/// Creates a dataset tree under a fresh temp directory.
/// `layout` lists `(category, [file names])`; image files get a small PNG/BMP/JPEG payload,
/// everything else is written as plain text.
pub fn create_test_dataset(layout: &[(&str, &[&str])]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    for (category, files) in layout {
        let category_dir = dir.path().join(category);
        std::fs::create_dir_all(&category_dir).expect("Failed to create category");
        for file in *files {
            write_fixture_file(&category_dir.join(file));
        }
    }
    dir
}

fn write_fixture_file(path: &Path) {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let img = dark_square_on_sheet();
    let format = match ext.as_str() {
        "png" => Some(image::ImageFormat::Png),
        "bmp" => Some(image::ImageFormat::Bmp),
        "jpg" | "jpeg" => Some(image::ImageFormat::Jpeg),
        _ => None,
    };
    match format {
        Some(format) => img
            .save_with_format(path, format)
            .expect("Failed to save test image"),
        None => std::fs::write(path, b"not an image").expect("Failed to write test file"),
    }
}

/// Color constants for tests
pub const TEST_BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const TEST_WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const TEST_SHEET: Rgb<u8> = Rgb([200, 200, 200]);
pub const TEST_GREEN: Rgb<u8> = Rgb([0, 255, 0]);
