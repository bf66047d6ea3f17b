use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Error raised at the string boundary of the detector
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectError {
    #[error("invalid mode '{0}': choose 'canny', 'adaptive', 'otsu', or 'morph'")]
    InvalidMode(String),

    #[error("invalid {name} '{value}': must be a finite number")]
    InvalidParameter { name: &'static str, value: String },
}

/// Detection strategy together with the parameters it uses
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DetectionMode {
    /// Equalize, 3x3 blur, then Canny edges
    Canny { low_threshold: f32, high_threshold: f32 },
    /// Gaussian-weighted local threshold, inverted
    Adaptive { block_size: u32, c_value: f32 },
    /// Global Otsu threshold, inverted
    Otsu,
    /// 3x3 morphological gradient
    Morph,
}

impl DetectionMode {
    /// Build a mode from its tag, taking whichever fields of `params` the mode uses.
    ///
    /// Fails on an unknown tag or when a field the mode reads is NaN or infinite.
    pub fn from_tag(tag: &str, params: &DetectionParams) -> Result<Self, DetectError> {
        let mode = tag.parse::<ModeKind>()?.with_params(params);
        mode.check_finite()?;
        Ok(mode)
    }

    fn check_finite(&self) -> Result<(), DetectError> {
        let fields: Vec<(&'static str, f32)> = match *self {
            DetectionMode::Canny {
                low_threshold,
                high_threshold,
            } => vec![("canny_low", low_threshold), ("canny_high", high_threshold)],
            DetectionMode::Adaptive { c_value, .. } => vec![("c_value", c_value)],
            DetectionMode::Otsu | DetectionMode::Morph => Vec::new(),
        };
        match fields.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(DetectError::InvalidParameter {
                name,
                value: value.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            DetectionMode::Canny { .. } => ModeKind::Canny,
            DetectionMode::Adaptive { .. } => ModeKind::Adaptive,
            DetectionMode::Otsu => ModeKind::Otsu,
            DetectionMode::Morph => ModeKind::Morph,
        }
    }
}

impl Default for DetectionMode {
    fn default() -> Self {
        ModeKind::Canny.with_params(&DetectionParams::default())
    }
}

/// Bare mode tag, as shown in pickers and accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModeKind {
    #[default]
    Canny,
    Adaptive,
    Otsu,
    Morph,
}

impl ModeKind {
    pub const ALL: [ModeKind; 4] = [
        ModeKind::Canny,
        ModeKind::Adaptive,
        ModeKind::Otsu,
        ModeKind::Morph,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeKind::Canny => "canny",
            ModeKind::Adaptive => "adaptive",
            ModeKind::Otsu => "otsu",
            ModeKind::Morph => "morph",
        }
    }

    pub fn with_params(self, params: &DetectionParams) -> DetectionMode {
        match self {
            ModeKind::Canny => DetectionMode::Canny {
                low_threshold: params.canny_low,
                high_threshold: params.canny_high,
            },
            ModeKind::Adaptive => DetectionMode::Adaptive {
                block_size: params.block_size,
                c_value: params.c_value,
            },
            ModeKind::Otsu => DetectionMode::Otsu,
            ModeKind::Morph => DetectionMode::Morph,
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeKind {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DetectError::InvalidMode(s.to_string()))
    }
}

/// Flat parameter record; each mode reads only its own fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionParams {
    pub canny_low: f32,
    pub canny_high: f32,
    pub block_size: u32,
    pub c_value: f32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            canny_low: 30.0,
            canny_high: 150.0,
            block_size: 11,
            c_value: 2.0,
        }
    }
}

/// Adaptive thresholding needs an odd window; even sizes are bumped by one
pub fn effective_block_size(block_size: u32) -> u32 {
    if block_size % 2 == 0 {
        block_size + 1
    } else {
        block_size
    }
}
