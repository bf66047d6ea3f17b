pub mod dataset;
pub mod detection;
pub mod models;
pub mod output;
pub mod session;

pub use dataset::Dataset;
pub use detection::{
    DetectError, DetectionMode, DetectionParams, ModeKind, detect_defects, detect_defects_tagged,
};
pub use models::{BoundingBox, Detection, Region};
pub use session::{Frame, Session};

#[cfg(feature = "gui")]
pub mod gui;
