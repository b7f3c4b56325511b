use serde::{Deserialize, Serialize};

use super::config::{Bounds, DetectionConfig};

/// Axis-aligned box around a detected notehead, in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `width / height`; zero for a degenerate box.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }

    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }
}

impl From<BoundingBox> for (u32, u32, u32, u32) {
    fn from(b: BoundingBox) -> Self {
        b.as_tuple()
    }
}

/// Geometric predicate a contour must pass to count as a notehead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidateFilter {
    pub area_min: f64,
    pub aspect_range: Bounds<f64>,
    pub size_range: Bounds<u32>,
}

impl CandidateFilter {
    pub fn from_config(config: &DetectionConfig) -> Self {
        Self {
            area_min: config.area_min,
            aspect_range: config.aspect_range,
            size_range: config.size_range,
        }
    }

    /// Accept a box when its contour is large enough, near-square, and
    /// both sides fall in the size band.
    pub fn accepts(&self, bbox: &BoundingBox, area: f64) -> bool {
        if area < self.area_min {
            return false;
        }
        if bbox.height == 0 || !self.aspect_range.contains(bbox.aspect_ratio()) {
            return false;
        }
        self.size_range.contains(bbox.width) && self.size_range.contains(bbox.height)
    }
}
