use ndarray::Array2;

/// Sigma implied by a kernel size when none is given, matching the usual
/// `0.3 * ((k - 1) * 0.5 - 1) + 0.8` rule.
pub fn sigma_for_kernel_size(ksize: usize) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Apply a `ksize x ksize` Gaussian blur using separable 1D convolution.
///
/// Borders are clamped (edge pixels replicated).
pub fn gaussian_blur_array(data: &Array2<f32>, ksize: usize) -> Array2<f32> {
    let kernel = make_gaussian_kernel(ksize, sigma_for_kernel_size(ksize));
    let row_pass = convolve_rows(data, &kernel);
    convolve_cols(&row_pass, &kernel)
}

fn make_gaussian_kernel(ksize: usize, sigma: f32) -> Vec<f32> {
    let radius = ksize / 2;
    let mut kernel = vec![0.0f32; 2 * radius + 1];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (_, w) = data.dim();
    let radius = kernel.len() / 2;

    Array2::from_shape_fn(data.dim(), |(row, col)| {
        let mut sum = 0.0f32;
        for (ki, &kv) in kernel.iter().enumerate() {
            let src_col =
                (col as isize + ki as isize - radius as isize).clamp(0, w as isize - 1) as usize;
            sum += data[[row, src_col]] * kv;
        }
        sum
    })
}

fn convolve_cols(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, _) = data.dim();
    let radius = kernel.len() / 2;

    Array2::from_shape_fn(data.dim(), |(row, col)| {
        let mut sum = 0.0f32;
        for (ki, &kv) in kernel.iter().enumerate() {
            let src_row =
                (row as isize + ki as isize - radius as isize).clamp(0, h as isize - 1) as usize;
            sum += data[[src_row, col]] * kv;
        }
        sum
    })
}
