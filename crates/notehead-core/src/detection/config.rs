use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ADAPTIVE_BLOCK_SIZE, DEFAULT_ADAPTIVE_OFFSET, DEFAULT_AREA_MIN, DEFAULT_ASPECT_MAX,
    DEFAULT_ASPECT_MIN, DEFAULT_BOX_COLOR, DEFAULT_BOX_THICKNESS, DEFAULT_CLEANUP_KERNEL_SIZE,
    DEFAULT_CLOSE_ITERATIONS, DEFAULT_OPEN_ITERATIONS, DEFAULT_SIZE_MAX, DEFAULT_SIZE_MIN,
    DEFAULT_STAFF_KERNEL_WIDTH,
};
use crate::error::{NoteheadError, Result};

/// Method used to separate ink from paper.
///
/// Every mode is inverted: dark pixels become foreground.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ThresholdMode {
    /// Otsu's method on a 256-bin histogram of the whole page.
    #[default]
    Otsu,
    /// Ink where a pixel is at least `offset` darker than the mean of its
    /// `block_size x block_size` neighborhood.
    AdaptiveMean { block_size: usize, offset: f32 },
    /// User-specified fixed threshold in [0.0, 1.0].
    Fixed(f32),
}

impl ThresholdMode {
    pub fn adaptive() -> Self {
        Self::AdaptiveMean {
            block_size: DEFAULT_ADAPTIVE_BLOCK_SIZE,
            offset: DEFAULT_ADAPTIVE_OFFSET,
        }
    }
}

impl std::fmt::Display for ThresholdMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Otsu => write!(f, "Otsu"),
            Self::AdaptiveMean { block_size, offset } => {
                write!(f, "Adaptive Mean (block {block_size}, offset {offset:.3})")
            }
            Self::Fixed(t) => write!(f, "Fixed ({t:.3})"),
        }
    }
}

/// Inclusive `[min, max]` range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Configuration for notehead detection on a single page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Binarization method.
    #[serde(default)]
    pub threshold_mode: ThresholdMode,
    /// Gaussian kernel size applied before thresholding; `None` disables the blur.
    #[serde(default)]
    pub blur_kernel_size: Option<usize>,
    /// Width of the horizontal element that isolates staff lines.
    #[serde(default = "default_staff_kernel_width")]
    pub staff_kernel_width: usize,
    /// Side of the elliptical cleanup element.
    #[serde(default = "default_cleanup_kernel_size")]
    pub cleanup_kernel_size: usize,
    #[serde(default = "default_open_iterations")]
    pub open_iterations: usize,
    #[serde(default = "default_close_iterations")]
    pub close_iterations: usize,
    /// Minimum contour area (px^2).
    #[serde(default = "default_area_min")]
    pub area_min: f64,
    /// Accepted width / height ratio.
    #[serde(default = "default_aspect_range")]
    pub aspect_range: Bounds<f64>,
    /// Accepted width and height, in pixels.
    #[serde(default = "default_size_range")]
    pub size_range: Bounds<u32>,
    /// Outline color (RGB).
    #[serde(default = "default_box_color")]
    pub box_color: [u8; 3],
    /// Outline thickness, in pixels.
    #[serde(default = "default_box_thickness")]
    pub box_thickness: u32,
}

fn default_staff_kernel_width() -> usize {
    DEFAULT_STAFF_KERNEL_WIDTH
}
fn default_cleanup_kernel_size() -> usize {
    DEFAULT_CLEANUP_KERNEL_SIZE
}
fn default_open_iterations() -> usize {
    DEFAULT_OPEN_ITERATIONS
}
fn default_close_iterations() -> usize {
    DEFAULT_CLOSE_ITERATIONS
}
fn default_area_min() -> f64 {
    DEFAULT_AREA_MIN
}
fn default_aspect_range() -> Bounds<f64> {
    Bounds::new(DEFAULT_ASPECT_MIN, DEFAULT_ASPECT_MAX)
}
fn default_size_range() -> Bounds<u32> {
    Bounds::new(DEFAULT_SIZE_MIN, DEFAULT_SIZE_MAX)
}
fn default_box_color() -> [u8; 3] {
    DEFAULT_BOX_COLOR
}
fn default_box_thickness() -> u32 {
    DEFAULT_BOX_THICKNESS
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold_mode: ThresholdMode::default(),
            blur_kernel_size: None,
            staff_kernel_width: DEFAULT_STAFF_KERNEL_WIDTH,
            cleanup_kernel_size: DEFAULT_CLEANUP_KERNEL_SIZE,
            open_iterations: DEFAULT_OPEN_ITERATIONS,
            close_iterations: DEFAULT_CLOSE_ITERATIONS,
            area_min: DEFAULT_AREA_MIN,
            aspect_range: default_aspect_range(),
            size_range: default_size_range(),
            box_color: DEFAULT_BOX_COLOR,
            box_thickness: DEFAULT_BOX_THICKNESS,
        }
    }
}

impl DetectionConfig {
    /// Check parameter consistency. Called by `NoteheadDetector::new`.
    pub fn validate(&self) -> Result<()> {
        if let ThresholdMode::AdaptiveMean { block_size, .. } = self.threshold_mode {
            if block_size < 3 || block_size % 2 == 0 {
                return Err(invalid(format!(
                    "adaptive block size must be odd and >= 3, got {block_size}"
                )));
            }
        }
        if let Some(k) = self.blur_kernel_size {
            if k == 0 || k % 2 == 0 {
                return Err(invalid(format!("blur kernel size must be odd, got {k}")));
            }
        }
        if self.staff_kernel_width == 0 {
            return Err(invalid("staff kernel width must be positive".into()));
        }
        if self.cleanup_kernel_size == 0 {
            return Err(invalid("cleanup kernel size must be positive".into()));
        }
        if self.area_min.is_nan() || self.area_min < 0.0 {
            return Err(invalid(format!(
                "minimum area must be non-negative, got {}",
                self.area_min
            )));
        }
        let aspect = self.aspect_range;
        if !(aspect.min > 0.0 && aspect.min <= aspect.max) {
            return Err(invalid(format!(
                "aspect range must satisfy 0 < min <= max, got {}..={}",
                aspect.min, aspect.max
            )));
        }
        if self.size_range.min > self.size_range.max {
            return Err(invalid(format!(
                "size range is inverted: {}..={}",
                self.size_range.min, self.size_range.max
            )));
        }
        if self.box_thickness == 0 {
            return Err(invalid("box thickness must be positive".into()));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> NoteheadError {
    NoteheadError::InvalidConfig(msg)
}
