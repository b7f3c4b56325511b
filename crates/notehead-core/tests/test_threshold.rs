use ndarray::Array2;

use notehead_core::detection::threshold::{
    adaptive_mean_mask, binarize, count_foreground, otsu_threshold,
};
use notehead_core::detection::ThresholdMode;

/// Left half dark, right half light.
fn bimodal(dark: f32, light: f32) -> Array2<f32> {
    Array2::from_shape_fn((10, 20), |(_, col)| if col < 10 { dark } else { light })
}

#[test]
fn test_otsu_threshold_splits_bimodal() {
    let data = bimodal(0.1, 0.9);
    let t = otsu_threshold(&data);
    assert!(t > 0.1 && t < 0.9, "threshold {t} not between modes");
}

#[test]
fn test_otsu_binarize_marks_dark_as_ink() {
    let data = bimodal(0.1, 0.9);
    let mask = binarize(&data, &ThresholdMode::Otsu);
    assert!(mask[[0, 0]]);
    assert!(mask[[9, 9]]);
    assert!(!mask[[0, 10]]);
    assert_eq!(count_foreground(&mask), 100);
}

#[test]
fn test_otsu_black_on_white() {
    let data = bimodal(0.0, 1.0);
    let mask = binarize(&data, &ThresholdMode::Otsu);
    assert_eq!(count_foreground(&mask), 100);
    assert!(!mask[[5, 15]]);
}

#[test]
fn test_otsu_blank_page_has_no_ink() {
    let data = Array2::<f32>::ones((16, 16));
    let mask = binarize(&data, &ThresholdMode::Otsu);
    assert_eq!(count_foreground(&mask), 0);
}

#[test]
fn test_adaptive_finds_small_dark_patch() {
    let mut data = Array2::<f32>::ones((30, 30));
    for row in 10..13 {
        for col in 10..13 {
            data[[row, col]] = 0.0;
        }
    }
    let mask = adaptive_mean_mask(&data, 15, 10.0 / 255.0);
    assert_eq!(count_foreground(&mask), 9);
    assert!(mask[[11, 11]]);
    assert!(!mask[[0, 0]]);
}

#[test]
fn test_adaptive_ignores_flat_regions() {
    let data = Array2::<f32>::from_elem((20, 20), 0.4);
    let mask = binarize(&data, &ThresholdMode::adaptive());
    assert_eq!(count_foreground(&mask), 0);
}

#[test]
fn test_adaptive_tolerates_uneven_lighting() {
    // Brightness ramps across the page; a dark dot on the dim side is still
    // darker than its surroundings.
    let mut data = Array2::from_shape_fn((21, 60), |(_, col)| 0.5 + col as f32 / 120.0);
    data[[10, 5]] = 0.3;
    let mask = binarize(
        &data,
        &ThresholdMode::AdaptiveMean {
            block_size: 7,
            offset: 0.05,
        },
    );
    assert!(mask[[10, 5]]);
    assert_eq!(count_foreground(&mask), 1);
}

#[test]
fn test_fixed_threshold_is_inclusive() {
    let data = Array2::from_shape_vec((1, 3), vec![0.3, 0.5, 0.7]).unwrap();
    let mask = binarize(&data, &ThresholdMode::Fixed(0.5));
    assert_eq!(mask.as_slice().unwrap(), &[true, true, false]);
}

#[test]
fn test_binarize_empty() {
    let data = Array2::<f32>::zeros((0, 0));
    assert_eq!(binarize(&data, &ThresholdMode::adaptive()).len(), 0);
}
