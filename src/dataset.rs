use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageReader, RgbImage};

/// Image extensions picked up inside a category directory
pub const IMAGE_EXTENSIONS: [&str; 4] = ["bmp", "jpg", "jpeg", "png"];

/// Check whether a path has one of the supported image extensions (case-insensitive)
pub fn is_supported_image_file(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext_lower = ext.to_string_lossy().to_lowercase();
        IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
    } else {
        false
    }
}

/// Decode an image file into 8-bit RGB
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = ImageReader::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read image: {}", path.display()))?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image {}: {}", path.display(), e))?;
    Ok(img.to_rgb8())
}

/// Read-only `<root>/<category>/<image>` tree of sample images
#[derive(Debug, Clone)]
pub struct Dataset {
    root: PathBuf,
}

impl Dataset {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sorted names of the subdirectories of the root
    pub fn categories(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read dataset: {}", self.root.display()))?;

        let mut categories = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            if let Some(name) = utf8_file_name(&path) {
                categories.push(name);
            }
        }

        categories.sort();
        Ok(categories)
    }

    /// Sorted file names of the supported images in one category
    pub fn images(&self, category: &str) -> Result<Vec<String>> {
        let dir = self.root.join(category);
        let entries = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read category: {}", dir.display()))?;

        let mut images = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && is_supported_image_file(&path) {
                if let Some(name) = utf8_file_name(&path) {
                    images.push(name);
                }
            }
        }

        images.sort();
        Ok(images)
    }

    pub fn image_path(&self, category: &str, file_name: &str) -> PathBuf {
        self.root.join(category).join(file_name)
    }

    pub fn load_image(&self, category: &str, file_name: &str) -> Result<RgbImage> {
        load_rgb(&self.image_path(category, file_name))
    }
}

fn utf8_file_name(path: &Path) -> Option<String> {
    let name = path.file_name()?;
    match name.to_str() {
        Some(name) => Some(name.to_string()),
        None => {
            log::warn!("Skipping non UTF-8 entry: {}", path.display());
            None
        }
    }
}
