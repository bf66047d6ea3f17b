#![allow(dead_code, unused_imports)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from defectscan for tests
pub use defectscan::{
    Dataset, DetectError, Detection, DetectionMode, DetectionParams, ModeKind, Region, Session,
    detect_defects, detect_defects_tagged,
};
