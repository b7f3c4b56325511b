pub mod candidate;
pub mod config;
pub mod contours;
pub mod detector;
pub mod morphology;
pub mod render;
pub mod threshold;

pub use candidate::{BoundingBox, CandidateFilter};
pub use config::{Bounds, DetectionConfig, ThresholdMode};
pub use detector::{detect_notes, DetectionResult, NoteheadDetector};
