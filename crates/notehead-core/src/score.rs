use image::{DynamicImage, RgbImage};
use ndarray::Array2;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};

/// A decoded score page.
///
/// Keeps the color copy for rendering and a normalized luminance plane
/// for the detection stages.
#[derive(Clone, Debug)]
pub struct ScoreImage {
    /// Color copy of the input, annotated in place by the renderer.
    pub color: RgbImage,
    /// Luminance in [0.0, 1.0], row-major, shape = (height, width).
    pub luma: Array2<f32>,
}

impl ScoreImage {
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let color = img.to_rgb8();
        let luma = luminance(&color);
        Self { color, luma }
    }

    pub fn width(&self) -> usize {
        self.luma.ncols()
    }

    pub fn height(&self) -> usize {
        self.luma.nrows()
    }
}

/// BT.601 weighted grayscale conversion.
pub fn luminance(color: &RgbImage) -> Array2<f32> {
    let (w, h) = color.dimensions();
    Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
        let [r, g, b] = color.get_pixel(col as u32, row as u32).0;
        (LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32) / 255.0
    })
}
