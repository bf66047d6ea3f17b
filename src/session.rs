//! Front-end state: what is selected, which parameters are set, and the
//! recompute that turns a selection into the three displayed images.
//!
//! Kept free of any toolkit so the GUI stays a thin view over it.

use std::ops::RangeInclusive;

use anyhow::Result;
use image::RgbImage;

use crate::dataset::Dataset;
use crate::detection::{DetectionMode, DetectionParams, ModeKind, detect_defects};
use crate::models::Detection;

pub const CANNY_THRESHOLD_RANGE: RangeInclusive<u8> = 0..=255;
pub const BLOCK_SIZE_RANGE: RangeInclusive<u32> = 3..=31;
pub const BLOCK_SIZE_STEP: u32 = 2;
pub const C_VALUE_RANGE: RangeInclusive<u8> = 0..=10;

pub const ORIGINAL_CAPTION: &str = "Original";
pub const ANNOTATED_CAPTION: &str = "With Bounding Boxes";
pub const MASK_CAPTION: &str = "Raw Edge/Threshold Output";

/// One rendered selection: the source image and what the detector made of it
#[derive(Debug, Clone)]
pub struct Frame {
    pub original: RgbImage,
    pub detection: Detection,
}

#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    categories: Vec<String>,
    category: Option<String>,
    images: Vec<String>,
    image: Option<String>,
    mode: ModeKind,
    canny_low: u8,
    canny_high: u8,
    block_size: u32,
    c_value: u8,
}

impl Session {
    /// Enumerate the dataset and preselect the first category and its first image
    pub fn open(dataset: Dataset) -> Result<Self> {
        let categories = dataset.categories()?;
        let defaults = DetectionParams::default();
        let mut session = Self {
            dataset,
            categories,
            category: None,
            images: Vec::new(),
            image: None,
            mode: ModeKind::default(),
            canny_low: defaults.canny_low as u8,
            canny_high: defaults.canny_high as u8,
            block_size: defaults.block_size,
            c_value: defaults.c_value as u8,
        };

        if let Some(first) = session.categories.first().cloned() {
            session.select_category(&first)?;
        }
        Ok(session)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn category(&self) -> Option<&String> {
        self.category.as_ref()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn image(&self) -> Option<&String> {
        self.image.as_ref()
    }

    pub fn mode(&self) -> ModeKind {
        self.mode
    }

    pub fn canny_low(&self) -> u8 {
        self.canny_low
    }

    pub fn canny_high(&self) -> u8 {
        self.canny_high
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    pub fn c_value(&self) -> u8 {
        self.c_value
    }

    /// Switch category; its image list is re-read and the first image selected
    pub fn select_category(&mut self, category: &str) -> Result<()> {
        if !self.categories.iter().any(|c| c == category) {
            anyhow::bail!("Unknown category: {}", category);
        }
        let images = self.dataset.images(category)?;
        self.image = images.first().cloned();
        self.images = images;
        self.category = Some(category.to_string());
        Ok(())
    }

    pub fn select_image(&mut self, image: &str) -> Result<()> {
        if !self.images.iter().any(|i| i == image) {
            anyhow::bail!("Unknown image: {}", image);
        }
        self.image = Some(image.to_string());
        Ok(())
    }

    /// Other modes' parameters are kept, so switching back restores them
    pub fn select_mode(&mut self, mode: ModeKind) {
        self.mode = mode;
    }

    pub fn set_canny_low(&mut self, value: u8) {
        self.canny_low = clamp_to(value, &CANNY_THRESHOLD_RANGE);
    }

    pub fn set_canny_high(&mut self, value: u8) {
        self.canny_high = clamp_to(value, &CANNY_THRESHOLD_RANGE);
    }

    pub fn set_block_size(&mut self, value: u32) {
        self.block_size = clamp_to(value, &BLOCK_SIZE_RANGE);
    }

    pub fn set_c_value(&mut self, value: u8) {
        self.c_value = clamp_to(value, &C_VALUE_RANGE);
    }

    pub fn params(&self) -> DetectionParams {
        DetectionParams {
            canny_low: self.canny_low as f32,
            canny_high: self.canny_high as f32,
            block_size: self.block_size,
            c_value: self.c_value as f32,
        }
    }

    pub fn detection_mode(&self) -> DetectionMode {
        self.mode.with_params(&self.params())
    }

    /// Load the selected image and run the detector on it.
    ///
    /// Returns `None` while no image is selected.
    pub fn render(&self) -> Result<Option<Frame>> {
        let (Some(category), Some(image)) = (&self.category, &self.image) else {
            return Ok(None);
        };

        let original = self.dataset.load_image(category, image)?;
        let detection = detect_defects(&original, &self.detection_mode());
        Ok(Some(Frame {
            original,
            detection,
        }))
    }
}

fn clamp_to<T: Ord + Copy>(value: T, range: &RangeInclusive<T>) -> T {
    value.clamp(*range.start(), *range.end())
}
