pub mod consts;
pub mod detection;
pub mod error;
pub mod filters;
pub mod io;
pub mod score;

pub use detection::{
    detect_notes, BoundingBox, DetectionConfig, DetectionResult, NoteheadDetector, ThresholdMode,
};
pub use error::{NoteheadError, Result};
