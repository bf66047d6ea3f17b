use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbImage;
use serde::Serialize;

use crate::detection::DetectionMode;
use crate::models::{Detection, Region};

/// Summary of one detector run, as printed with `--json`
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub image: String,
    #[serde(flatten)]
    pub mode: DetectionMode,
    pub width: u32,
    pub height: u32,
    pub region_count: usize,
    pub drawn_count: usize,
    pub regions: Vec<Region>,
}

impl DetectionReport {
    pub fn new(image: impl Into<String>, mode: DetectionMode, detection: &Detection) -> Self {
        Self {
            image: image.into(),
            mode,
            width: detection.annotated.width(),
            height: detection.annotated.height(),
            region_count: detection.region_count(),
            drawn_count: detection.drawn_count(),
            regions: detection.regions.clone(),
        }
    }
}

/// Make sure `dir` can take output files.
/// The directory must be empty or non-existent.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read output directory: {}", dir.display()))?;
        if entries.count() > 0 {
            return Err(anyhow::anyhow!(
                "Output directory is not empty: {}",
                dir.display()
            ));
        }
    } else {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }
    Ok(())
}

/// Write the three views of a run as `<stem>_original.png`, `<stem>_boxes.png`
/// and `<stem>_mask.png`. Returns the written paths in that order.
pub fn save_views(
    dir: &Path,
    stem: &str,
    original: &RgbImage,
    detection: &Detection,
) -> Result<Vec<PathBuf>> {
    let original_path = dir.join(format!("{stem}_original.png"));
    let boxes_path = dir.join(format!("{stem}_boxes.png"));
    let mask_path = dir.join(format!("{stem}_mask.png"));

    original
        .save(&original_path)
        .map_err(|e| anyhow::anyhow!("Failed to save {}: {}", original_path.display(), e))?;
    detection
        .annotated
        .save(&boxes_path)
        .map_err(|e| anyhow::anyhow!("Failed to save {}: {}", boxes_path.display(), e))?;
    detection
        .mask
        .save(&mask_path)
        .map_err(|e| anyhow::anyhow!("Failed to save {}: {}", mask_path.display(), e))?;

    log::debug!("Saved views for {stem} to {}", dir.display());
    Ok(vec![original_path, boxes_path, mask_path])
}
