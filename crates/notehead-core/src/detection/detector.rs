use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::filters::gaussian_blur::gaussian_blur_array;
use crate::io::image_io::{derive_output_path, load_score, save_annotated};
use crate::score::ScoreImage;

use super::candidate::{BoundingBox, CandidateFilter};
use super::config::DetectionConfig;
use super::contours::find_external_contours;
use super::morphology::{clean_noise, remove_staff_lines};
use super::render::draw_boxes;
use super::threshold::{binarize, count_foreground};

/// Outcome of one detection call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Where the annotated copy was written.
    pub output_path: PathBuf,
    /// Accepted boxes in contour-discovery order.
    pub boxes: Vec<BoundingBox>,
}

/// Heuristic notehead detector for scanned scores.
#[derive(Clone, Debug, Default)]
pub struct NoteheadDetector {
    config: DetectionConfig,
}

impl NoteheadDetector {
    /// Build a detector, rejecting inconsistent configurations.
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect noteheads in `image_path` and write the annotated copy next to it.
    pub fn detect(&self, image_path: impl AsRef<Path>) -> Result<DetectionResult> {
        let image_path = image_path.as_ref();
        self.detect_to(image_path, derive_output_path(image_path))
    }

    /// Same as [`detect`](Self::detect) with an explicit output path.
    pub fn detect_to(
        &self,
        image_path: impl AsRef<Path>,
        output_path: impl Into<PathBuf>,
    ) -> Result<DetectionResult> {
        let image_path = image_path.as_ref();
        let output_path = output_path.into();

        let mut score = load_score(image_path)?;
        debug!(
            width = score.width(),
            height = score.height(),
            path = %image_path.display(),
            "Score loaded"
        );

        let boxes = self.detect_boxes(&score);

        draw_boxes(
            &mut score.color,
            &boxes,
            self.config.box_color,
            self.config.box_thickness,
        );
        save_annotated(&score.color, &output_path)?;

        info!(
            input = %image_path.display(),
            output = %output_path.display(),
            count = boxes.len(),
            "Notehead detection complete"
        );

        Ok(DetectionResult { output_path, boxes })
    }

    /// Run the detection stages on an already decoded page. No I/O.
    ///
    /// Pipeline: optional Gaussian blur -> inverted threshold -> staff-line
    /// removal -> open/close cleanup -> external contours -> candidate filter.
    pub fn detect_boxes(&self, score: &ScoreImage) -> Vec<BoundingBox> {
        let config = &self.config;

        // Step 1: Optional blur against scan noise.
        let blurred;
        let luma = match config.blur_kernel_size {
            Some(ksize) => {
                blurred = gaussian_blur_array(&score.luma, ksize);
                &blurred
            }
            None => &score.luma,
        };

        // Step 2: Ink becomes foreground.
        let ink = binarize(luma, &config.threshold_mode);
        debug!(
            mode = %config.threshold_mode,
            ink_pixels = count_foreground(&ink),
            "Binarized"
        );

        // Step 3: Remove staff lines.
        let (no_staff, lines) = remove_staff_lines(&ink, config.staff_kernel_width);
        debug!(
            staff_pixels = count_foreground(&lines),
            kernel_width = config.staff_kernel_width,
            "Staff lines removed"
        );

        // Step 4: Drop speckle, re-join strokes cut by staff removal.
        let cleaned = clean_noise(
            &no_staff,
            config.cleanup_kernel_size,
            config.open_iterations,
            config.close_iterations,
        );

        // Step 5: Outer contours only.
        let contours = find_external_contours(&cleaned);

        // Step 6: Keep near-square blobs of plausible size.
        let filter = CandidateFilter::from_config(config);
        let boxes: Vec<BoundingBox> = contours
            .iter()
            .filter_map(|contour| {
                let bbox = contour.bounding_rect();
                filter.accepts(&bbox, contour.area()).then_some(bbox)
            })
            .collect();

        debug!(
            contours = contours.len(),
            accepted = boxes.len(),
            "Candidates filtered"
        );

        boxes
    }
}

/// Detect noteheads with the default configuration.
///
/// Writes `<stem>_detected.<ext>` next to the input and returns its path
/// with the accepted boxes.
pub fn detect_notes(image_path: impl AsRef<Path>) -> Result<DetectionResult> {
    NoteheadDetector::default().detect(image_path)
}
