use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;
use ndarray::Array2;

use super::config::ThresholdMode;

/// Binarize a luminance plane so that ink (dark) pixels are `true`.
pub fn binarize(data: &Array2<f32>, mode: &ThresholdMode) -> Array2<bool> {
    match *mode {
        ThresholdMode::Otsu => {
            let threshold = otsu_threshold(data);
            data.mapv(|v| v < threshold)
        }
        ThresholdMode::AdaptiveMean { block_size, offset } => {
            adaptive_mean_mask(data, block_size, offset)
        }
        ThresholdMode::Fixed(t) => data.mapv(|v| v <= t),
    }
}

/// Otsu's thresholding on the 8-bit quantized plane.
///
/// Returns the upper edge of the winning level, so `v < threshold` selects
/// exactly the pixels that quantize to that level or below.
pub fn otsu_threshold(data: &Array2<f32>) -> f32 {
    let (h, w) = data.dim();
    let quantized = GrayImage::from_fn(w as u32, h as u32, |x, y| {
        Luma([(data[[y as usize, x as usize]].clamp(0.0, 1.0) * 255.0).round() as u8])
    });
    (otsu_level(&quantized) as f32 + 0.5) / 255.0
}

/// Local mean thresholding: a pixel is ink when it is at least `offset`
/// darker than the mean of the `block_size` square around it.
///
/// The window is clipped at the image border; means come from a
/// summed-area table so the cost does not depend on `block_size`.
pub fn adaptive_mean_mask(data: &Array2<f32>, block_size: usize, offset: f32) -> Array2<bool> {
    let (h, w) = data.dim();
    if h == 0 || w == 0 {
        return Array2::from_elem((h, w), false);
    }

    let integral = summed_area_table(data);
    let radius = block_size / 2;

    Array2::from_shape_fn((h, w), |(row, col)| {
        let r0 = row.saturating_sub(radius);
        let r1 = (row + radius).min(h - 1) + 1;
        let c0 = col.saturating_sub(radius);
        let c1 = (col + radius).min(w - 1) + 1;

        let sum = integral[[r1, c1]] - integral[[r0, c1]] - integral[[r1, c0]]
            + integral[[r0, c0]];
        let count = ((r1 - r0) * (c1 - c0)) as f64;
        let mean = (sum / count) as f32;

        data[[row, col]] <= mean - offset
    })
}

/// `(h + 1) x (w + 1)` table where entry `[r, c]` is the sum of all pixels
/// above and to the left of `(r, c)`.
fn summed_area_table(data: &Array2<f32>) -> Array2<f64> {
    let (h, w) = data.dim();
    let mut table = Array2::<f64>::zeros((h + 1, w + 1));

    for row in 0..h {
        let mut row_sum = 0.0_f64;
        for col in 0..w {
            row_sum += data[[row, col]] as f64;
            table[[row + 1, col + 1]] = table[[row, col + 1]] + row_sum;
        }
    }

    table
}

/// Number of foreground pixels in a mask.
pub fn count_foreground(mask: &Array2<bool>) -> usize {
    mask.iter().filter(|&&v| v).count()
}
