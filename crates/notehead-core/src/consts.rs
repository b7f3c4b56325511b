/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Default window size for adaptive mean thresholding (pixels, odd).
pub const DEFAULT_ADAPTIVE_BLOCK_SIZE: usize = 15;

/// Default constant subtracted from the local mean in adaptive thresholding,
/// on the normalized [0.0, 1.0] intensity scale (10 / 255).
pub const DEFAULT_ADAPTIVE_OFFSET: f32 = 10.0 / 255.0;

/// Fixed threshold level used when none is given.
pub const DEFAULT_FIXED_THRESHOLD: f32 = 0.5;

/// Width of the horizontal structuring element used to isolate staff lines.
pub const DEFAULT_STAFF_KERNEL_WIDTH: usize = 25;

/// Side of the elliptical structuring element used for noise cleanup.
pub const DEFAULT_CLEANUP_KERNEL_SIZE: usize = 3;

/// Opening passes applied during cleanup (removes speckle).
pub const DEFAULT_OPEN_ITERATIONS: usize = 1;

/// Closing passes applied during cleanup (re-joins strokes cut by staff removal).
pub const DEFAULT_CLOSE_ITERATIONS: usize = 2;

/// Minimum contour area (px^2) for a notehead candidate.
pub const DEFAULT_AREA_MIN: f64 = 30.0;

/// Lower bound on bounding-box width / height.
pub const DEFAULT_ASPECT_MIN: f64 = 0.7;

/// Upper bound on bounding-box width / height.
pub const DEFAULT_ASPECT_MAX: f64 = 1.3;

/// Smallest accepted bounding-box side (pixels).
pub const DEFAULT_SIZE_MIN: u32 = 5;

/// Largest accepted bounding-box side (pixels).
pub const DEFAULT_SIZE_MAX: u32 = 120;

/// Outline color for detected boxes (RGB green).
pub const DEFAULT_BOX_COLOR: [u8; 3] = [0, 255, 0];

/// Outline thickness for detected boxes (pixels).
pub const DEFAULT_BOX_THICKNESS: u32 = 2;

/// Suffix inserted before the extension of the input path to form the output path.
pub const OUTPUT_SUFFIX: &str = "_detected";

/// Extension used when the input path has none.
pub const FALLBACK_OUTPUT_EXTENSION: &str = "png";
